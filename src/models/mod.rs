//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod contacto;
pub mod espacio;
pub mod estadisticas;
pub mod incidencia;
pub mod reserva;
pub mod user;
