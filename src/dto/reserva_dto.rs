use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::validation::{deserialize_hora, validate_not_past};

// Nueva reserva
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_rango_horario"))]
pub struct CrearReservaRequest {
    pub espacio_id: Uuid,

    #[validate(custom = "validate_not_past")]
    pub fecha: NaiveDate,

    #[serde(deserialize_with = "deserialize_hora")]
    pub hora_inicio: NaiveTime,

    #[serde(deserialize_with = "deserialize_hora")]
    pub hora_fin: NaiveTime,

    #[validate(length(max = 500))]
    pub notas: Option<String>,
}

fn validate_rango_horario(request: &CrearReservaRequest) -> Result<(), ValidationError> {
    if request.hora_inicio >= request.hora_fin {
        let mut error = ValidationError::new("rango_horario");
        error.message = Some("La hora de inicio debe ser anterior a la de término".into());
        return Err(error);
    }
    Ok(())
}

// Cancelación de reserva
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CancelarReservaRequest {
    #[validate(length(max = 500))]
    pub motivo: Option<String>,
}
