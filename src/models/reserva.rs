//! Modelo de Reserva
//!
//! Una reserva une a un usuario con un espacio en una franja horaria.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoReserva {
    Pendiente,
    Confirmada,
    Cancelada,
    Completada,
}

impl EstadoReserva {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoReserva::Pendiente => "pendiente",
            EstadoReserva::Confirmada => "confirmada",
            EstadoReserva::Cancelada => "cancelada",
            EstadoReserva::Completada => "completada",
        }
    }

    /// Solo las reservas vivas se pueden cancelar
    pub fn can_cancel(&self) -> bool {
        matches!(self, EstadoReserva::Pendiente | EstadoReserva::Confirmada)
    }
}

impl FromStr for EstadoReserva {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(EstadoReserva::Pendiente),
            "confirmada" => Ok(EstadoReserva::Confirmada),
            "cancelada" => Ok(EstadoReserva::Cancelada),
            "completada" => Ok(EstadoReserva::Completada),
            other => Err(format!("estado de reserva desconocido: {}", other)),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Reserva {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub espacio_id: Uuid,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub precio_total: Decimal,
    pub estado: String,
    pub notas: Option<String>,
    pub motivo_cancelacion: Option<String>,
    pub fecha_cancelacion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub espacio_nombre: Option<String>,
}

impl Reserva {
    pub fn estado(&self) -> Option<EstadoReserva> {
        self.estado.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservaResponse {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub espacio_id: Uuid,
    pub espacio_nombre: Option<String>,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub precio_total: f64,
    pub estado: String,
    pub notas: Option<String>,
    pub motivo_cancelacion: Option<String>,
    pub fecha_cancelacion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Reserva> for ReservaResponse {
    fn from(reserva: Reserva) -> Self {
        Self {
            id: reserva.id,
            usuario_id: reserva.usuario_id,
            espacio_id: reserva.espacio_id,
            espacio_nombre: reserva.espacio_nombre,
            fecha: reserva.fecha,
            hora_inicio: reserva.hora_inicio,
            hora_fin: reserva.hora_fin,
            precio_total: reserva.precio_total.to_f64().unwrap_or(0.0),
            estado: reserva.estado,
            notas: reserva.notas,
            motivo_cancelacion: reserva.motivo_cancelacion,
            fecha_cancelacion: reserva.fecha_cancelacion,
            created_at: reserva.created_at,
        }
    }
}

/// Precio de una franja: `precio_hora` por las horas reservadas, redondeado a 2 decimales
pub fn calcular_precio_total(
    precio_hora: Decimal,
    hora_inicio: NaiveTime,
    hora_fin: NaiveTime,
) -> Option<Decimal> {
    let minutos = (hora_fin - hora_inicio).num_minutes();
    if minutos <= 0 {
        return None;
    }
    let total = precio_hora * Decimal::from(minutos) / Decimal::from(60);
    Some(total.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hora(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_precio_total_by_minutes() {
        let precio = Decimal::from(20000);
        assert_eq!(
            calcular_precio_total(precio, hora(18, 0), hora(19, 30)),
            Some(Decimal::from(30000))
        );
        assert_eq!(calcular_precio_total(precio, hora(19, 0), hora(18, 0)), None);
        assert_eq!(calcular_precio_total(precio, hora(19, 0), hora(19, 0)), None);
    }

    #[test]
    fn test_cancellable_states() {
        assert!(EstadoReserva::Pendiente.can_cancel());
        assert!(EstadoReserva::Confirmada.can_cancel());
        assert!(!EstadoReserva::Cancelada.can_cancel());
        assert!(!EstadoReserva::Completada.can_cancel());
    }
}
