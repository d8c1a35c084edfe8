//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs con `#[validate(custom = ...)]`.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

lazy_static! {
    /// Teléfono con prefijo internacional opcional, 8 a 15 dígitos
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{7,18}$").expect("regex de teléfono");
}

/// Validar que un string no esté vacío ni sea solo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("El campo no puede estar vacío".into());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_RE.is_match(value.trim()) || !(8..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("Teléfono inválido".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que una fecha de reserva no esté en el pasado
pub fn validate_not_past(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value < chrono::Local::now().date_naive() {
        let mut error = ValidationError::new("fecha_pasada");
        error.message = Some("La fecha no puede estar en el pasado".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        let mut error = ValidationError::new(code);
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &allowed.join(", "));
        return Err(error);
    }
    Ok(())
}

/// Interpreta horas `HH:MM` o `HH:MM:SS`
pub fn parse_hora(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// `deserialize_with` para campos de hora
pub fn deserialize_hora<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_hora(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("hora inválida '{}', se espera HH:MM", raw)))
}

/// Tipos de espacio aceptados
pub fn validate_tipo_espacio(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, crate::models::espacio::TIPOS_ESPACIO, "tipo_espacio")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+56 9 1234 5678").is_ok());
        assert!(validate_phone("912345678").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("telefono").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Cancha").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_not_past() {
        let tomorrow = chrono::Local::now().date_naive() + chrono::Duration::days(1);
        let yesterday = chrono::Local::now().date_naive() - chrono::Duration::days(1);
        assert!(validate_not_past(&tomorrow).is_ok());
        assert!(validate_not_past(&yesterday).is_err());
    }

    #[test]
    fn test_parse_hora() {
        assert_eq!(parse_hora("18:30"), NaiveTime::from_hms_opt(18, 30, 0));
        assert_eq!(parse_hora("07:05:09"), NaiveTime::from_hms_opt(7, 5, 9));
        assert_eq!(parse_hora("25:00"), None);
        assert_eq!(parse_hora("mediodía"), None);
    }

    #[test]
    fn test_validate_tipo_espacio() {
        assert!(validate_tipo_espacio("padel").is_ok());
        assert!(validate_tipo_espacio("ajedrez").is_err());
    }
}
