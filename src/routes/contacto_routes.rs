use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::controllers::contacto_controller::ContactoController;
use crate::dto::api_response::ApiResponse;
use crate::dto::contacto_dto::CrearMensajeContactoRequest;
use crate::models::contacto::MensajeContacto;
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::extractors::extract_validated_json;

pub fn create_contacto_router() -> Router<AppState> {
    Router::new().route("/", post(send_mensaje))
}

async fn send_mensaje(
    State(state): State<AppState>,
    payload: Result<Json<CrearMensajeContactoRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<MensajeContacto>>)> {
    let request = extract_validated_json(payload)?;
    let controller = ContactoController::new(state.pool.clone());
    let mensaje = controller.enviar(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            mensaje,
            "Mensaje enviado, te responderemos pronto",
        )),
    ))
}
