//! Modelo de Mensaje de Contacto

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Mensaje enviado desde el formulario público de contacto
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MensajeContacto {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub asunto: String,
    pub mensaje: String,
    pub leido: bool,
    pub respondido: bool,
    pub created_at: DateTime<Utc>,
}
