use crate::dto::incidencia_dto::{CambiarEstadoIncidenciaRequest, CrearIncidenciaRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::incidencia::{EstadoIncidencia, Incidencia};
use crate::repositories::incidencia_repository::IncidenciaRepository;
use crate::repositories::reserva_repository::ReservaRepository;
use crate::utils::errors::{forbidden_error, not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub fn validar_transicion(actual: &str, destino: EstadoIncidencia) -> Result<(), AppError> {
    let actual: EstadoIncidencia = actual
        .parse()
        .map_err(|e: String| AppError::Internal(e))?;

    if actual.puede_pasar_a(destino) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "No se puede pasar de '{}' a '{}'",
            actual, destino
        )))
    }
}

pub struct IncidenciaController {
    incidencias: IncidenciaRepository,
    reservas: ReservaRepository,
}

impl IncidenciaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            incidencias: IncidenciaRepository::new(pool.clone()),
            reservas: ReservaRepository::new(pool),
        }
    }

    pub async fn mis_incidencias(&self, user: &AuthenticatedUser) -> Result<Vec<Incidencia>, AppError> {
        self.incidencias.find_by_usuario(user.user_id).await
    }

    pub async fn crear(
        &self,
        user: &AuthenticatedUser,
        request: CrearIncidenciaRequest,
    ) -> Result<Incidencia, AppError> {
        if let Some(reserva_id) = request.reserva_id {
            let reserva = self
                .reservas
                .find_by_id(reserva_id)
                .await?
                .ok_or_else(|| not_found_error("Reserva", &reserva_id.to_string()))?;
            if reserva.usuario_id != user.user_id {
                return Err(forbidden_error("vincular la reserva", "no te pertenece"));
            }
        }

        self.incidencias.create(user.user_id, &request).await
    }

    pub async fn listar_todas(&self) -> Result<Vec<Incidencia>, AppError> {
        self.incidencias.find_all().await
    }

    pub async fn cambiar_estado(
        &self,
        id: Uuid,
        request: CambiarEstadoIncidenciaRequest,
    ) -> Result<Incidencia, AppError> {
        let incidencia = self
            .incidencias
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Incidencia", &id.to_string()))?;

        validar_transicion(&incidencia.estado, request.estado)?;

        let actualizada = self
            .incidencias
            .update_estado(id, request.estado, request.respuesta.as_deref())
            .await?
            .ok_or_else(|| not_found_error("Incidencia", &id.to_string()))?;

        log::info!("🎫 Incidencia {} → {}", id, request.estado);
        Ok(actualizada)
    }
}
