//! Middleware de autenticación JWT
//!
//! Un único gate envuelve todo el router: limpia las cabeceras de identidad
//! que venga del cliente, verifica el token (`authToken` o `Bearer`) y aplica
//! las reglas de rol por prefijo. Los handlers leen la identidad con el
//! extractor [`AuthenticatedUser`] y nunca vuelven a verificar el token.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token, Claims},
    },
};

pub const AUTH_COOKIE: &str = "authToken";
pub const HEADER_USER_ID: &str = "x-user-id";
pub const HEADER_USER_EMAIL: &str = "x-user-email";
pub const HEADER_USER_ROLE: &str = "x-user-role";

/// Rutas accesibles sin sesión. `/*` al final indica prefijo.
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/espacios",
    "/espacios/*",
    "/contacto",
    "/unauthorized",
    "/forbidden",
    "/health",
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/logout",
    "/api/espacios",
    "/api/espacios/*",
    "/api/contacto",
];

const ADMIN_PREFIXES: &[&str] = &["/api/admin", "/admin", "/dashboard/admin"];
const OWNER_PREFIXES: &[&str] = &["/propietario", "/dashboard/propietario"];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|entry| match entry.strip_suffix("/*") {
        Some(base) => path
            .strip_prefix(base)
            .map_or(false, |rest| rest.starts_with('/')),
        None => path == *entry,
    })
}

pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn matches_any_prefix(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Unauthenticated,
    Forbidden,
}

/// Decide qué hacer con una petición según la ruta y el rol verificado
pub fn decide(path: &str, role: Option<UserRole>) -> GateDecision {
    if is_public_path(path) {
        return GateDecision::Allow;
    }

    let Some(role) = role else {
        return GateDecision::Unauthenticated;
    };

    if matches_any_prefix(path, ADMIN_PREFIXES) && !role.is_admin() {
        return GateDecision::Forbidden;
    }
    if matches_any_prefix(path, OWNER_PREFIXES) && !role.can_manage_venues() {
        return GateDecision::Forbidden;
    }

    GateDecision::Allow
}

/// Token de la cookie `authToken`, o del header `Authorization: Bearer`
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_token_from_header)
        .map(str::to_string)
}

fn strip_identity_headers(headers: &mut HeaderMap) {
    for name in [HEADER_USER_ID, HEADER_USER_EMAIL, HEADER_USER_ROLE] {
        headers.remove(name);
    }
}

fn inject_identity(headers: &mut HeaderMap, claims: &Claims) {
    headers.insert(
        HEADER_USER_ID,
        HeaderValue::from_str(&claims.user_id.to_string()).unwrap_or(HeaderValue::from_static("")),
    );
    // codificado: un email con caracteres no ASCII no es un valor de cabecera válido
    match HeaderValue::from_str(&urlencoding::encode(&claims.email)) {
        Ok(email) => {
            headers.insert(HEADER_USER_EMAIL, email);
        }
        Err(e) => tracing::debug!("x-user-email omitido para {}: {}", claims.user_id, e),
    }
    headers.insert(HEADER_USER_ROLE, HeaderValue::from_static(claims.role.as_str()));
}

fn unauthenticated_response(path_and_query: &str, api: bool) -> Response {
    if api {
        AppError::Unauthorized("No autenticado".to_string()).into_response()
    } else {
        let target = format!(
            "/unauthorized?redirect={}",
            urlencoding::encode(path_and_query)
        );
        Redirect::temporary(&target).into_response()
    }
}

fn forbidden_response(api: bool) -> Response {
    if api {
        AppError::Forbidden("No tienes permisos para acceder a este recurso".to_string())
            .into_response()
    } else {
        Redirect::temporary("/forbidden").into_response()
    }
}

/// Gate de autorización aplicado a todas las rutas
pub async fn auth_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    strip_identity_headers(request.headers_mut());

    let path = request.uri().path().to_string();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    let claims = token_from_headers(request.headers())
        .and_then(|token| verify_token(&token, &state.jwt));

    match decide(&path, claims.as_ref().map(|c| c.role)) {
        GateDecision::Allow => {
            if let Some(claims) = claims {
                inject_identity(request.headers_mut(), &claims);
                request.extensions_mut().insert(claims);
            }
            next.run(request).await
        }
        GateDecision::Unauthenticated => {
            tracing::debug!("🔒 Petición sin sesión válida a {}", path);
            unauthenticated_response(&path_and_query, is_api_path(&path))
        }
        GateDecision::Forbidden => {
            tracing::warn!(
                "⛔ Rol {:?} sin permisos para {}",
                claims.as_ref().map(|c| c.role),
                path
            );
            forbidden_response(is_api_path(&path))
        }
    }
}

/// Usuario autenticado, leído de las cabeceras que inyecta el gate
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let text = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        Some(Self {
            user_id: text(HEADER_USER_ID)?.parse().ok()?,
            email: text(HEADER_USER_EMAIL)
                .and_then(|v| urlencoding::decode(v).ok())
                .map(|email| email.into_owned())
                .unwrap_or_default(),
            role: text(HEADER_USER_ROLE)?.parse().ok()?,
        })
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ))
        }
    }

    pub fn require_owner(&self) -> Result<(), AppError> {
        if self.role.can_manage_venues() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Solo propietarios pueden gestionar espacios".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthenticatedUser::from_headers(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("No autenticado".to_string()))
    }
}
