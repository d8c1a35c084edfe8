use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, VerifyResponse};
use crate::middleware::auth::AUTH_COOKIE;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::extractors::extract_validated_json;
use crate::utils::jwt::Claims;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/verify", get(verify))
}

/// Cookie de sesión: httpOnly, SameSite=Lax, Secure en producción
pub fn auth_cookie(token: String, state: &AppState) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .secure(state.config.is_production())
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(state.jwt.expiration as i64))
        .build()
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.pool.clone(), state.jwt.clone())
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let request = extract_validated_json(payload)?;
    let response = controller(&state).login(request).await?;
    let jar = jar.add(auth_cookie(response.token.clone(), &state));
    Ok((jar, Json(response)))
}

async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let request = extract_validated_json(payload)?;
    let response = controller(&state).register(request).await?;
    let jar = jar.add(auth_cookie(response.token.clone(), &state));
    Ok((StatusCode::CREATED, jar, Json(response)))
}

async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    (jar, Json(json!({ "success": true, "message": "Sesión cerrada" })))
}

async fn verify(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
) -> AppResult<Json<VerifyResponse>> {
    let Extension(claims) =
        claims.ok_or_else(|| AppError::Unauthorized("No autenticado".to_string()))?;
    let response = controller(&state).verify(&claims).await?;
    Ok(Json(response))
}
