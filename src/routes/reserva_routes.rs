use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::reserva_controller::ReservaController;
use crate::dto::reserva_dto::{CancelarReservaRequest, CrearReservaRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::reserva::ReservaResponse;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::{extract_path, extract_validated_json, parse_optional_json};

pub fn create_reserva_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reservas).post(create_reserva))
        .route("/:id/cancelar", patch(cancel_reserva))
}

async fn list_reservas(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<ReservaResponse>>> {
    let controller = ReservaController::new(state.pool.clone());
    Ok(Json(controller.mis_reservas(&user).await?))
}

async fn create_reserva(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<CrearReservaRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ReservaResponse>)> {
    let request = extract_validated_json(payload)?;
    let controller = ReservaController::new(state.pool.clone());
    let reserva = controller.crear(&user, request).await?;
    Ok((StatusCode::CREATED, Json(reserva)))
}

async fn cancel_reserva(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    id: Result<Path<Uuid>, PathRejection>,
    body: Bytes,
) -> AppResult<Json<ReservaResponse>> {
    let id = extract_path(id)?;
    let request: CancelarReservaRequest = parse_optional_json(&body)?;
    request.validate()?;
    let controller = ReservaController::new(state.pool.clone());
    Ok(Json(controller.cancelar(&user, id, request).await?))
}
