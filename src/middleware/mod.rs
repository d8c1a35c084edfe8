//! Middleware del sistema
//!
//! Gate de autorización y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::{auth_gate, AuthenticatedUser};
pub use cors::cors_middleware_with_origins;
