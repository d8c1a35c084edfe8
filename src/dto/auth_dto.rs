use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{UserResponse, UserRole};
use crate::utils::validation::{validate_not_blank, validate_phone};

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

// Registro de usuario
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100), custom = "validate_not_blank")]
    pub nombre: String,

    #[validate(length(max = 100))]
    pub apellido: Option<String>,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,

    #[validate(custom = "validate_phone")]
    pub telefono: Option<String>,

    pub rol: Option<UserRole>,
}

// Respuesta de login y registro
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub redirect_to: &'static str,
}

// Respuesta de verificación de sesión
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserResponse,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "ana@example.com".into(),
            password: "secreta".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "no-es-email".into(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_request_validation() {
        let mut request = RegisterRequest {
            nombre: "Ana".into(),
            apellido: Some("Pérez".into()),
            email: "ana@example.com".into(),
            password: "123456".into(),
            telefono: Some("+56 9 1234 5678".into()),
            rol: Some(UserRole::Propietario),
        };
        assert!(request.validate().is_ok());

        request.password = "123".into();
        request.telefono = Some("abc".into());
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("telefono"));
    }

    #[test]
    fn test_register_request_deserializes_role() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "nombre": "Luis",
            "email": "luis@example.com",
            "password": "123456",
            "rol": "propietario"
        }))
        .unwrap();
        assert_eq!(request.rol, Some(UserRole::Propietario));
        assert!(request.apellido.is_none());
    }
}
