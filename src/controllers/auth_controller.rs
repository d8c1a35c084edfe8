use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, VerifyResponse};
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::{NuevoUsuario, UserRepository};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::jwt::{generate_token, get_token_remaining_time, Claims, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use lazy_static::lazy_static;
use sqlx::PgPool;

const CREDENCIALES_INVALIDAS: &str = "Credenciales inválidas";

lazy_static! {
    // Mismo costo que los hashes reales: un email desconocido tarda lo mismo
    static ref HASH_RELLENO: Option<String> = hash("juegamas-sin-usuario", DEFAULT_COST).ok();
}

/// Email desconocido y contraseña incorrecta dan el mismo error
pub fn verificar_credenciales(user: Option<User>, password: &str) -> Result<User, AppError> {
    let Some(user) = user else {
        if let Some(relleno) = HASH_RELLENO.as_ref() {
            let _ = verify(password, relleno);
        }
        return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
    };

    let valid = verify(password, &user.password_hash).unwrap_or_else(|e| {
        log::warn!("⚠️ Hash ilegible para el usuario {}: {}", user.id, e);
        false
    });

    if !valid {
        return Err(AppError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
    }

    Ok(user)
}

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt,
        }
    }

    fn auth_response(&self, user: User) -> Result<AuthResponse, AppError> {
        let role = user.role();
        let token = generate_token(user.id, &user.email, role, &self.jwt)?;

        Ok(AuthResponse {
            user: user.into(),
            token,
            redirect_to: role.dashboard_path(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = request.email.trim().to_lowercase();
        let user = self.repository.find_by_email(&email).await?;
        let user = verificar_credenciales(user, &request.password)?;

        log::info!("🔑 Login de {} ({})", user.id, user.rol);
        self.auth_response(user)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let rol = request.rol.unwrap_or(UserRole::Usuario);
        if !rol.is_self_assignable() {
            return Err(validation_error("rol", "Rol no permitido en el registro"));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let email = request.email.trim().to_lowercase();
        let user = self
            .repository
            .create(NuevoUsuario {
                nombre: request.nombre.trim(),
                apellido: request.apellido.as_deref().map(str::trim),
                email: &email,
                password_hash: &password_hash,
                rol,
                telefono: request.telefono.as_deref(),
            })
            .await?;

        self.auth_response(user)
    }

    /// Sesión actual: los datos del usuario se releen de la base
    pub async fn verify(&self, claims: &Claims) -> Result<VerifyResponse, AppError> {
        let user = self
            .repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        Ok(VerifyResponse {
            valid: true,
            user: user.into(),
            expires_in: get_token_remaining_time(claims),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn usuario(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            nombre: "Ana".into(),
            apellido: None,
            email: "ana@example.com".into(),
            password_hash: hash(password, 4).unwrap(),
            rol: "propietario".into(),
            telefono: None,
            foto_perfil: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn mensaje(result: Result<User, AppError>) -> String {
        match result {
            Err(AppError::Unauthorized(msg)) => msg,
            other => panic!("se esperaba Unauthorized, se obtuvo {:?}", other.map(|u| u.id)),
        }
    }

    #[test]
    fn test_valid_credentials() {
        let user = verificar_credenciales(Some(usuario("clave123")), "clave123").unwrap();
        assert_eq!(user.role(), UserRole::Propietario);
    }

    #[test]
    fn test_unknown_email_and_wrong_password_look_the_same() {
        let desconocido = mensaje(verificar_credenciales(None, "clave123"));
        let incorrecta = mensaje(verificar_credenciales(Some(usuario("clave123")), "otra"));
        assert_eq!(desconocido, incorrecta);
    }

    #[test]
    fn test_unknown_email_still_runs_a_full_cost_verify() {
        let relleno = HASH_RELLENO.as_ref().expect("hash de relleno");
        assert!(relleno.starts_with(&format!("$2b${}$", DEFAULT_COST)));
        assert!(!verify("clave123", relleno).unwrap());

        assert!(matches!(
            verificar_credenciales(None, "clave123"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_corrupt_hash_is_rejected() {
        let mut user = usuario("clave123");
        user.password_hash = "no-es-bcrypt".into();
        assert!(matches!(
            verificar_credenciales(Some(user), "clave123"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
