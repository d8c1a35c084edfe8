use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::espacio_controller::{paso_wizard, subir_imagen_espacio, EspacioController};
use crate::controllers::estadisticas_controller::EstadisticasController;
use crate::dto::espacio_dto::{
    BorradorEspacio, CambiarEstadoEspacioRequest, CreacionEspacioResponse, EspacioListResponse,
    EspacioQuery, TendenciasQuery,
};
use crate::dto::user_dto::{ImageUploadRequest, ImageUploadResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::espacio::{EspacioDetalle, EspacioResponse};
use crate::models::estadisticas::{
    EstadisticasEspacio, EstadisticasEspacioResponse, OcupacionFranja, TendenciaMensual,
};
use crate::services::storage_service::MAX_IMAGE_REQUEST_BYTES;
use crate::services::wizard::{PasoWizardRequest, WizardState};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::{extract_json, extract_path, extract_query, extract_validated_json};

pub fn create_espacio_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_espacios).post(create_espacio))
        .route("/borrador/paso", post(wizard_step))
        .route(
            "/imagenes",
            post(upload_imagen).layer(DefaultBodyLimit::max(MAX_IMAGE_REQUEST_BYTES)),
        )
        .route("/:id", get(get_espacio))
        .route("/:id/estadisticas", get(get_estadisticas))
        .route("/:id/ocupacion", get(get_ocupacion))
        .route("/:id/tendencias", get(get_tendencias))
        .route("/:id/estado", patch(change_estado))
}

async fn list_espacios(
    State(state): State<AppState>,
    query: Result<Query<EspacioQuery>, QueryRejection>,
) -> AppResult<Json<EspacioListResponse>> {
    let query = extract_query(query)?;
    let controller = EspacioController::new(state.pool.clone());
    Ok(Json(controller.listar(query).await?))
}

async fn get_espacio(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<EspacioDetalle>> {
    let id = extract_path(id)?;
    let controller = EspacioController::new(state.pool.clone());
    Ok(Json(controller.detalle(id, user.as_ref()).await?))
}

async fn create_espacio(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<BorradorEspacio>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreacionEspacioResponse>)> {
    let borrador = extract_json(payload)?;
    let controller = EspacioController::new(state.pool.clone());
    let response = controller.crear(&user, borrador).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn wizard_step(
    payload: Result<Json<PasoWizardRequest>, JsonRejection>,
) -> AppResult<Json<WizardState>> {
    let request = extract_json(payload)?;
    Ok(Json(paso_wizard(request)?))
}

async fn upload_imagen(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<ImageUploadRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ImageUploadResponse>)> {
    let request = extract_validated_json(payload)?;
    let response = subir_imagen_espacio(&user, request, &state.storage).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn change_estado(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CambiarEstadoEspacioRequest>, JsonRejection>,
) -> AppResult<Json<EspacioResponse>> {
    let id = extract_path(id)?;
    let request = extract_json(payload)?;
    let controller = EspacioController::new(state.pool.clone());
    Ok(Json(controller.cambiar_estado(&user, id, request.estado).await?))
}

async fn get_estadisticas(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<EstadisticasEspacioResponse<EstadisticasEspacio>>> {
    let id = extract_path(id)?;
    let controller = EstadisticasController::new(state.pool.clone());
    Ok(Json(controller.espacio(id).await))
}

async fn get_ocupacion(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<EstadisticasEspacioResponse<Vec<OcupacionFranja>>>> {
    let id = extract_path(id)?;
    let controller = EstadisticasController::new(state.pool.clone());
    Ok(Json(controller.ocupacion(id).await))
}

async fn get_tendencias(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<TendenciasQuery>, QueryRejection>,
) -> AppResult<Json<EstadisticasEspacioResponse<Vec<TendenciaMensual>>>> {
    let id = extract_path(id)?;
    let query = extract_query(query)?;
    let controller = EstadisticasController::new(state.pool.clone());
    Ok(Json(controller.tendencias(id, query.meses).await))
}
