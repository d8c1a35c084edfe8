use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::incidencia_controller::IncidenciaController;
use crate::dto::incidencia_dto::CrearIncidenciaRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::incidencia::Incidencia;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::extract_validated_json;

pub fn create_incidencia_router() -> Router<AppState> {
    Router::new().route("/", get(list_incidencias).post(create_incidencia))
}

async fn list_incidencias(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<Incidencia>>> {
    let controller = IncidenciaController::new(state.pool.clone());
    Ok(Json(controller.mis_incidencias(&user).await?))
}

async fn create_incidencia(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<CrearIncidenciaRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Incidencia>)> {
    let request = extract_validated_json(payload)?;
    let controller = IncidenciaController::new(state.pool.clone());
    let incidencia = controller.crear(&user, request).await?;
    Ok((StatusCode::CREATED, Json(incidencia)))
}
