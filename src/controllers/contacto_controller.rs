use crate::dto::contacto_dto::{ActualizarMensajeRequest, CrearMensajeContactoRequest};
use crate::models::contacto::MensajeContacto;
use crate::repositories::contacto_repository::ContactoRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ContactoController {
    repository: ContactoRepository,
}

impl ContactoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ContactoRepository::new(pool),
        }
    }

    pub async fn enviar(&self, request: CrearMensajeContactoRequest) -> Result<MensajeContacto, AppError> {
        self.repository.create(&request).await
    }

    pub async fn listar(&self) -> Result<Vec<MensajeContacto>, AppError> {
        self.repository.find_all().await
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarMensajeRequest,
    ) -> Result<MensajeContacto, AppError> {
        if request.leido.is_none() && request.respondido.is_none() {
            return Err(validation_error("leido", "Indica leido o respondido"));
        }

        self.repository
            .update_flags(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Mensaje", &id.to_string()))
    }
}
