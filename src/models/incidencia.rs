//! Modelo de Incidencia
//!
//! Tickets de soporte abiertos por usuarios, opcionalmente ligados a una reserva.
//! El ciclo de vida es pendiente → en_revision → resuelta | cerrada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoIncidencia {
    Reserva,
    Pago,
    Espacio,
    Cuenta,
    Otro,
}

impl TipoIncidencia {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoIncidencia::Reserva => "reserva",
            TipoIncidencia::Pago => "pago",
            TipoIncidencia::Espacio => "espacio",
            TipoIncidencia::Cuenta => "cuenta",
            TipoIncidencia::Otro => "otro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoIncidencia {
    Pendiente,
    EnRevision,
    Resuelta,
    Cerrada,
}

impl EstadoIncidencia {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoIncidencia::Pendiente => "pendiente",
            EstadoIncidencia::EnRevision => "en_revision",
            EstadoIncidencia::Resuelta => "resuelta",
            EstadoIncidencia::Cerrada => "cerrada",
        }
    }

    pub fn puede_pasar_a(&self, destino: EstadoIncidencia) -> bool {
        use EstadoIncidencia::*;
        matches!(
            (self, destino),
            (Pendiente, EnRevision)
                | (Pendiente, Cerrada)
                | (EnRevision, Resuelta)
                | (EnRevision, Cerrada)
                | (Resuelta, Cerrada)
        )
    }
}

impl fmt::Display for EstadoIncidencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoIncidencia {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(EstadoIncidencia::Pendiente),
            "en_revision" => Ok(EstadoIncidencia::EnRevision),
            "resuelta" => Ok(EstadoIncidencia::Resuelta),
            "cerrada" => Ok(EstadoIncidencia::Cerrada),
            other => Err(format!("estado de incidencia desconocido: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Incidencia {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub reserva_id: Option<Uuid>,
    pub tipo: String,
    pub asunto: String,
    pub descripcion: String,
    pub estado: String,
    pub respuesta: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_transitions() {
        use EstadoIncidencia::*;
        assert!(Pendiente.puede_pasar_a(EnRevision));
        assert!(EnRevision.puede_pasar_a(Resuelta));
        assert!(EnRevision.puede_pasar_a(Cerrada));
        assert!(Resuelta.puede_pasar_a(Cerrada));

        assert!(!Pendiente.puede_pasar_a(Resuelta));
        assert!(!Cerrada.puede_pasar_a(Pendiente));
        assert!(!Resuelta.puede_pasar_a(EnRevision));
        assert!(!EnRevision.puede_pasar_a(EnRevision));
    }

    #[test]
    fn test_estado_serializes_snake_case() {
        let json = serde_json::to_string(&EstadoIncidencia::EnRevision).unwrap();
        assert_eq!(json, "\"en_revision\"");
        assert_eq!(
            "en_revision".parse::<EstadoIncidencia>().unwrap(),
            EstadoIncidencia::EnRevision
        );
    }
}
