//! Rutas fuera de `/api`: redirección al dashboard y páginas de error del gate

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;

pub fn create_page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/dashboard", get(dashboard))
        .route("/unauthorized", get(unauthorized))
        .route("/forbidden", get(forbidden))
        .route("/health", get(health))
}

/// `api_url` es la URL pública con la que el frontend llama a esta API
async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": "JuegaMás API",
        "version": env!("CARGO_PKG_VERSION"),
        "api_url": state.config.public_api_url,
    }))
}

/// Cada rol tiene su propio dashboard
async fn dashboard(user: AuthenticatedUser) -> impl IntoResponse {
    Redirect::temporary(user.role.dashboard_path())
}

#[derive(Debug, Deserialize)]
struct RedirectQuery {
    redirect: Option<String>,
}

async fn unauthorized(query: Option<Query<RedirectQuery>>) -> Json<Value> {
    let redirect = query.and_then(|Query(q)| q.redirect);
    Json(json!({
        "error": "Debes iniciar sesión para acceder a esta página",
        "code": "UNAUTHORIZED",
        "login": "/login",
        "redirect": redirect,
    }))
}

async fn forbidden() -> Json<Value> {
    Json(json!({
        "error": "No tienes permisos para acceder a esta página",
        "code": "FORBIDDEN",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
