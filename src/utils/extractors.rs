//! Extracción de cuerpos y query strings
//!
//! Los errores de deserialización se convierten en `AppError::BadRequest`
//! para que toda respuesta de error tenga el cuerpo JSON uniforme.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::utils::errors::AppError;

/// Extraer el cuerpo JSON
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(value)| value)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extraer el cuerpo JSON y validarlo con `validator`
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}

/// Extraer parámetros de la ruta (`/:id`)
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(value)| value)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extraer parámetros de query string
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(value)| value)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Cuerpo JSON opcional: solo un cuerpo vacío equivale al valor por defecto
pub fn parse_optional_json<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Cuerpo JSON inválido: {}", e)))
}
