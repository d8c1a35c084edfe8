use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::api_response::ApiResponse;
use crate::dto::user_dto::{
    ChangePasswordRequest, ImageUploadRequest, ImageUploadResponse, UpdateProfileRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserResponse;
use crate::services::storage_service::MAX_IMAGE_REQUEST_BYTES;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::extract_validated_json;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/perfil", get(get_perfil).put(update_perfil))
        .route("/password", put(change_password))
        .route(
            "/foto",
            post(upload_foto).layer(DefaultBodyLimit::max(MAX_IMAGE_REQUEST_BYTES)),
        )
}

async fn get_perfil(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let controller = UserController::new(state.pool.clone());
    Ok(Json(controller.perfil(user.user_id).await?))
}

async fn update_perfil(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Json<UserResponse>> {
    let request = extract_validated_json(payload)?;
    let controller = UserController::new(state.pool.clone());
    Ok(Json(controller.actualizar_perfil(user.user_id, request).await?))
}

async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let request = extract_validated_json(payload)?;
    let controller = UserController::new(state.pool.clone());
    controller.cambiar_password(user.user_id, request).await?;
    Ok(Json(ApiResponse::success_with_message((), "Contraseña actualizada")))
}

async fn upload_foto(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<ImageUploadRequest>, JsonRejection>,
) -> AppResult<Json<ImageUploadResponse>> {
    let request = extract_validated_json(payload)?;
    let controller = UserController::new(state.pool.clone());
    let response = controller
        .subir_foto(user.user_id, request, &state.storage)
        .await?;
    Ok(Json(response))
}
