use crate::dto::user_dto::{
    ChangePasswordRequest, ImageUploadRequest, ImageUploadResponse, UpdateProfileRequest,
};
use crate::models::user::{User, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::services::storage_service::{decode_image_payload, StorageClient, BUCKET_PERFILES};
use crate::utils::errors::{validation_error, AppError};
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    async fn find_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }

    pub async fn perfil(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        Ok(self.find_user(user_id).await?.into())
    }

    pub async fn actualizar_perfil(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        if request.is_empty() {
            return Err(validation_error("perfil", "No hay cambios que guardar"));
        }

        let user = self
            .repository
            .update_profile(user_id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user.into())
    }

    pub async fn cambiar_password(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;

        let valid = verify(&request.password_actual, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized(
                "La contraseña actual es incorrecta".to_string(),
            ));
        }

        let nuevo_hash = hash(&request.password_nueva, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;
        self.repository.update_password(user_id, &nuevo_hash).await?;

        log::info!("🔐 Contraseña actualizada para {}", user_id);
        Ok(())
    }

    pub async fn subir_foto(
        &self,
        user_id: Uuid,
        request: ImageUploadRequest,
        storage: &StorageClient,
    ) -> Result<ImageUploadResponse, AppError> {
        let image = decode_image_payload(&request.imagen_base64, &request.content_type)?;
        let url = storage
            .upload_image(BUCKET_PERFILES, &user_id.to_string(), image)
            .await?;

        self.repository
            .update_foto(user_id, &url)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(ImageUploadResponse { url })
    }
}
