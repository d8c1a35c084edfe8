use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::controllers::contacto_controller::ContactoController;
use crate::controllers::incidencia_controller::IncidenciaController;
use crate::dto::admin_dto::UsuariosRecientesQuery;
use crate::dto::contacto_dto::ActualizarMensajeRequest;
use crate::dto::incidencia_dto::CambiarEstadoIncidenciaRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::contacto::MensajeContacto;
use crate::models::estadisticas::EstadisticasAdmin;
use crate::models::incidencia::Incidencia;
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::{extract_json, extract_path, extract_query, extract_validated_json};

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/estadisticas", get(get_estadisticas))
        .route("/usuarios-recientes", get(get_usuarios_recientes))
        .route("/contacto", get(list_mensajes))
        .route("/contacto/:id", patch(update_mensaje))
        .route("/incidencias", get(list_incidencias))
        .route("/incidencias/:id/estado", patch(change_estado_incidencia))
}

async fn get_estadisticas(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<EstadisticasAdmin>> {
    user.require_admin()?;
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.estadisticas().await))
}

async fn get_usuarios_recientes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    query: Result<Query<UsuariosRecientesQuery>, QueryRejection>,
) -> AppResult<Json<Vec<UserResponse>>> {
    user.require_admin()?;
    let query = extract_query(query)?;
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.usuarios_recientes(query.limite()).await?))
}

async fn list_mensajes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<MensajeContacto>>> {
    user.require_admin()?;
    let controller = ContactoController::new(state.pool.clone());
    Ok(Json(controller.listar().await?))
}

async fn update_mensaje(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ActualizarMensajeRequest>, JsonRejection>,
) -> AppResult<Json<MensajeContacto>> {
    user.require_admin()?;
    let id = extract_path(id)?;
    let request = extract_json(payload)?;
    let controller = ContactoController::new(state.pool.clone());
    Ok(Json(controller.actualizar(id, request).await?))
}

async fn list_incidencias(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<Incidencia>>> {
    user.require_admin()?;
    let controller = IncidenciaController::new(state.pool.clone());
    Ok(Json(controller.listar_todas().await?))
}

async fn change_estado_incidencia(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CambiarEstadoIncidenciaRequest>, JsonRejection>,
) -> AppResult<Json<Incidencia>> {
    user.require_admin()?;
    let id = extract_path(id)?;
    let request = extract_validated_json(payload)?;
    let controller = IncidenciaController::new(state.pool.clone());
    Ok(Json(controller.cambiar_estado(id, request).await?))
}
