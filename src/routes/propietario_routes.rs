use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::propietario_controller::PropietarioController;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::espacio::EspacioResponse;
use crate::models::estadisticas::ResumenPropietario;
use crate::models::reserva::ReservaResponse;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_propietario_router() -> Router<AppState> {
    Router::new()
        .route("/espacios", get(get_espacios))
        .route("/resumen", get(get_resumen))
        .route("/reservas", get(get_reservas))
}

async fn get_espacios(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<EspacioResponse>>> {
    let controller = PropietarioController::new(state.pool.clone());
    Ok(Json(controller.espacios(&user).await?))
}

async fn get_resumen(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<ResumenPropietario>> {
    let controller = PropietarioController::new(state.pool.clone());
    Ok(Json(controller.resumen(&user).await?))
}

async fn get_reservas(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<ReservaResponse>>> {
    let controller = PropietarioController::new(state.pool.clone());
    Ok(Json(controller.reservas(&user).await?))
}
