use crate::dto::api_response::total_pages;
use crate::dto::espacio_dto::{
    BorradorEspacio, CreacionEspacioResponse, EspacioFilters, EspacioListResponse, EspacioQuery,
};
use crate::dto::user_dto::{ImageUploadRequest, ImageUploadResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::espacio::{Espacio, EspacioDetalle, EspacioResponse, EstadoEspacio};
use crate::repositories::espacio_repository::EspacioRepository;
use crate::services::espacio_service::EspacioService;
use crate::services::storage_service::{decode_image_payload, StorageClient, BUCKET_ESPACIOS};
use crate::services::wizard::{validar_borrador, PasoWizardRequest, WizardState};
use crate::utils::errors::{forbidden_error, not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

/// Reglas del ciclo de vida de un espacio.
///
/// El administrador puede moverlo a cualquier estado. El propietario solo
/// alterna entre `activo` e `inactivo` una vez aprobado.
pub fn puede_cambiar_estado(
    user: &AuthenticatedUser,
    espacio: &Espacio,
    destino: EstadoEspacio,
) -> Result<(), AppError> {
    if user.role.is_admin() {
        return Ok(());
    }
    if espacio.propietario_id != user.user_id {
        return Err(forbidden_error("cambiar el estado", "el espacio no te pertenece"));
    }

    match (espacio.estado(), destino) {
        (Some(EstadoEspacio::Activo), EstadoEspacio::Inactivo)
        | (Some(EstadoEspacio::Inactivo), EstadoEspacio::Activo) => Ok(()),
        (Some(EstadoEspacio::Pendiente), _) => Err(forbidden_error(
            "cambiar el estado",
            "el espacio está pendiente de aprobación",
        )),
        _ => Err(AppError::BadRequest(format!(
            "Transición no permitida hacia '{}'",
            destino
        ))),
    }
}

/// Un espacio no activo solo lo ven su propietario y los administradores
fn puede_ver(espacio: &Espacio, viewer: Option<&AuthenticatedUser>) -> bool {
    espacio.is_active()
        || viewer.map_or(false, |u| u.role.is_admin() || u.user_id == espacio.propietario_id)
}

pub struct EspacioController {
    repository: EspacioRepository,
}

impl EspacioController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EspacioRepository::new(pool),
        }
    }

    pub async fn listar(&self, query: EspacioQuery) -> Result<EspacioListResponse, AppError> {
        let filters = EspacioFilters::try_from(query)?;
        let (espacios, total) = self.repository.list(&filters).await?;

        Ok(EspacioListResponse {
            espacios: espacios.into_iter().map(EspacioResponse::from).collect(),
            total,
            page: filters.page,
            per_page: filters.per_page,
            total_pages: total_pages(total, filters.per_page),
        })
    }

    pub async fn detalle(
        &self,
        id: Uuid,
        viewer: Option<&AuthenticatedUser>,
    ) -> Result<EspacioDetalle, AppError> {
        let espacio = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|e| puede_ver(e, viewer))
            .ok_or_else(|| not_found_error("Espacio", &id.to_string()))?;

        let caracteristicas = self.repository.find_caracteristicas(id).await?;
        let imagenes = self.repository.find_imagenes(id).await?;
        let horarios = self.repository.find_horarios(id).await?;

        Ok(EspacioDetalle {
            espacio: espacio.into(),
            caracteristicas,
            imagenes,
            horarios,
        })
    }

    /// Envío final del wizard
    pub async fn crear(
        self,
        user: &AuthenticatedUser,
        borrador: BorradorEspacio,
    ) -> Result<CreacionEspacioResponse, AppError> {
        user.require_owner()?;
        let nuevo = validar_borrador(&borrador)?;

        EspacioService::new(self.repository)
            .crear(user.user_id, nuevo)
            .await
    }

    pub async fn cambiar_estado(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        destino: EstadoEspacio,
    ) -> Result<EspacioResponse, AppError> {
        let espacio = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Espacio", &id.to_string()))?;

        puede_cambiar_estado(user, &espacio, destino)?;

        let actualizado = self
            .repository
            .update_estado(id, destino)
            .await?
            .ok_or_else(|| not_found_error("Espacio", &id.to_string()))?;

        Ok(actualizado.into())
    }
}

/// Un paso de navegación del wizard; no toca la base de datos
pub fn paso_wizard(request: PasoWizardRequest) -> Result<WizardState, AppError> {
    let mut estado = request.estado;
    estado.aplicar(request.accion)?;
    Ok(estado)
}

pub async fn subir_imagen_espacio(
    user: &AuthenticatedUser,
    request: ImageUploadRequest,
    storage: &StorageClient,
) -> Result<ImageUploadResponse, AppError> {
    user.require_owner()?;
    let image = decode_image_payload(&request.imagen_base64, &request.content_type)?;
    let url = storage
        .upload_image(BUCKET_ESPACIOS, &user.user_id.to_string(), image)
        .await?;

    Ok(ImageUploadResponse { url })
}
