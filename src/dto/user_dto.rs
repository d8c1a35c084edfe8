use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_phone};

// Actualización parcial del perfil
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100), custom = "validate_not_blank")]
    pub nombre: Option<String>,

    #[validate(length(max = 100))]
    pub apellido: Option<String>,

    #[validate(custom = "validate_phone")]
    pub telefono: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.apellido.is_none() && self.telefono.is_none()
    }
}

// Cambio de contraseña
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "La contraseña actual es requerida"))]
    pub password_actual: String,

    #[validate(length(min = 6, max = 100, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password_nueva: String,
}

// Imagen codificada en base64 (foto de perfil o imagen de espacio)
#[derive(Debug, Deserialize, Validate)]
pub struct ImageUploadRequest {
    #[validate(length(min = 1, message = "La imagen es requerida"))]
    pub imagen_base64: String,

    #[validate(length(min = 1))]
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_update() {
        let request: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(request.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let request = UpdateProfileRequest {
            nombre: Some("    ".into()),
            apellido: None,
            telefono: None,
        };
        assert!(request.validate().is_err());
    }
}
