//! Router de la aplicación
//!
//! Cada recurso tiene su propio router; `create_app` los anida y aplica el
//! gate de autorización, el trazado de peticiones y CORS.

pub mod admin_routes;
pub mod auth_routes;
pub mod contacto_routes;
pub mod espacio_routes;
pub mod incidencia_routes;
pub mod page_routes;
pub mod propietario_routes;
pub mod reserva_routes;
pub mod user_routes;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_gate, cors_middleware_with_origins};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware_with_origins(&state.config.cors_origins);

    Router::new()
        .merge(page_routes::create_page_router())
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/usuarios", user_routes::create_user_router())
        .nest("/api/espacios", espacio_routes::create_espacio_router())
        .nest("/api/propietario", propietario_routes::create_propietario_router())
        .nest("/api/reservas", reserva_routes::create_reserva_router())
        .nest("/api/contacto", contacto_routes::create_contacto_router())
        .nest("/api/incidencias", incidencia_routes::create_incidencia_router())
        .nest("/api/admin", admin_routes::create_admin_router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Ruta no encontrada".to_string())
}
