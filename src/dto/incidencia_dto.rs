use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::incidencia::{EstadoIncidencia, TipoIncidencia};

// Nueva incidencia
#[derive(Debug, Deserialize, Validate)]
pub struct CrearIncidenciaRequest {
    pub reserva_id: Option<Uuid>,

    pub tipo: TipoIncidencia,

    #[validate(length(min = 3, max = 150))]
    pub asunto: String,

    #[validate(length(min = 10, max = 5000))]
    pub descripcion: String,
}

// Cambio de estado por un administrador
#[derive(Debug, Deserialize, Validate)]
pub struct CambiarEstadoIncidenciaRequest {
    pub estado: EstadoIncidencia,

    #[validate(length(min = 1, max = 5000))]
    pub respuesta: Option<String>,
}
