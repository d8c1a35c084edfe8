//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid wizard step {paso}: {errors}")]
    InvalidStep {
        paso: u8,
        errors: validator::ValidationErrors,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Cuerpo uniforme de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Hash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) | AppError::InvalidStep { .. } | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DB_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidStep { .. } => "WIZARD_STEP_INVALID",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Hash(_) => "HASH_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let (message, details) = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                ("Error interno del servidor".to_string(), None)
            }
            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ("Datos inválidos".to_string(), Some(json!(e)))
            }
            AppError::InvalidStep { paso, errors } => {
                warn!("Wizard step {} invalid: {}", paso, errors);
                (
                    format!("El paso {} tiene datos inválidos", paso),
                    Some(json!({ "paso": paso, "errores": errors })),
                )
            }
            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                (msg, None)
            }
            AppError::Forbidden(msg) => {
                warn!("Forbidden access: {}", msg);
                (msg, None)
            }
            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (msg, None)
            }
            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (msg, None)
            }
            AppError::Hash(msg) => {
                error!("Hash error: {}", msg);
                ("Error procesando credenciales".to_string(), None)
            }
            AppError::Storage(msg) => {
                error!("Storage error: {}", msg);
                ("No se pudo subir la imagen".to_string(), None)
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ("Error interno del servidor".to_string(), None)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code,
                details,
            }),
        )
            .into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    AppError::Validation(single_field_errors(field, message))
}

pub(crate) fn single_field_errors(
    field: &'static str,
    message: &'static str,
) -> validator::ValidationErrors {
    let mut error = validator::ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} con id '{}' no encontrado", resource, id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("No se puede {}: {}", operation, reason))
}
