use crate::dto::user_dto::UpdateProfileRequest;
use crate::models::user::{User, UserRole};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, nombre, apellido, email, password_hash, rol, telefono, \
                            foto_perfil, created_at, updated_at";

/// Datos para insertar un usuario nuevo
pub struct NuevoUsuario<'a> {
    pub nombre: &'a str,
    pub apellido: Option<&'a str>,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub rol: UserRole,
    pub telefono: Option<&'a str>,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM usuarios WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM usuarios WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Un email duplicado sale como error de base de datos (violación de unique)
    pub async fn create(&self, nuevo: NuevoUsuario<'_>) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO usuarios (nombre, apellido, email, password_hash, rol, telefono)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(nuevo.nombre)
        .bind(nuevo.apellido)
        .bind(nuevo.email)
        .bind(nuevo.password_hash)
        .bind(nuevo.rol.as_str())
        .bind(nuevo.telefono)
        .fetch_one(&self.pool)
        .await?;

        log::info!("👤 Usuario {} registrado con rol {}", user.id, user.rol);
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        cambios: &UpdateProfileRequest,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE usuarios
            SET nombre = COALESCE($2, nombre),
                apellido = COALESCE($3, apellido),
                telefono = COALESCE($4, telefono),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(cambios.nombre.as_deref())
        .bind(cambios.apellido.as_deref())
        .bind(cambios.telefono.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE usuarios SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_foto(&self, id: Uuid, url: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE usuarios SET foto_perfil = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_recent(&self, limite: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM usuarios ORDER BY created_at DESC LIMIT $1",
            USER_COLUMNS
        ))
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
