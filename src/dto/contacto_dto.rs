use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Formulario público de contacto
#[derive(Debug, Deserialize, Validate)]
pub struct CrearMensajeContactoRequest {
    #[validate(length(min = 2, max = 100), custom = "validate_not_blank")]
    pub nombre: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 3, max = 150))]
    pub asunto: String,

    #[validate(length(min = 10, max = 5000, message = "El mensaje debe tener al menos 10 caracteres"))]
    pub mensaje: String,
}

// Marcas de lectura y respuesta (admin)
#[derive(Debug, Deserialize)]
pub struct ActualizarMensajeRequest {
    pub leido: Option<bool>,
    pub respondido: Option<bool>,
}
