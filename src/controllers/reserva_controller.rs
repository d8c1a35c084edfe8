use crate::dto::reserva_dto::{CancelarReservaRequest, CrearReservaRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::reserva::{calcular_precio_total, Reserva, ReservaResponse};
use crate::repositories::espacio_repository::EspacioRepository;
use crate::repositories::reserva_repository::{NuevaReserva, ReservaRepository};
use crate::utils::errors::{forbidden_error, not_found_error, validation_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

/// Solo el titular cancela, y solo reservas pendientes o confirmadas
pub fn validar_cancelacion(reserva: &Reserva, user_id: Uuid) -> Result<(), AppError> {
    if reserva.usuario_id != user_id {
        return Err(forbidden_error("cancelar la reserva", "no te pertenece"));
    }
    match reserva.estado() {
        Some(estado) if estado.can_cancel() => Ok(()),
        _ => Err(AppError::BadRequest(format!(
            "Una reserva en estado '{}' no se puede cancelar",
            reserva.estado
        ))),
    }
}

pub struct ReservaController {
    reservas: ReservaRepository,
    espacios: EspacioRepository,
}

impl ReservaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            reservas: ReservaRepository::new(pool.clone()),
            espacios: EspacioRepository::new(pool),
        }
    }

    pub async fn mis_reservas(&self, user: &AuthenticatedUser) -> Result<Vec<ReservaResponse>, AppError> {
        let reservas = self.reservas.find_by_usuario(user.user_id).await?;
        Ok(reservas.into_iter().map(ReservaResponse::from).collect())
    }

    pub async fn crear(
        &self,
        user: &AuthenticatedUser,
        request: CrearReservaRequest,
    ) -> Result<ReservaResponse, AppError> {
        let espacio = self
            .espacios
            .find_by_id(request.espacio_id)
            .await?
            .filter(|e| e.is_active())
            .ok_or_else(|| not_found_error("Espacio", &request.espacio_id.to_string()))?;

        let precio_total =
            calcular_precio_total(espacio.precio_hora, request.hora_inicio, request.hora_fin)
                .ok_or_else(|| {
                    validation_error("hora_fin", "La hora de término debe ser posterior al inicio")
                })?;

        if self
            .reservas
            .existe_solape(espacio.id, request.fecha, request.hora_inicio, request.hora_fin)
            .await?
        {
            return Err(AppError::BadRequest(
                "El horario seleccionado ya está reservado".to_string(),
            ));
        }

        let reserva = self
            .reservas
            .create(NuevaReserva {
                usuario_id: user.user_id,
                espacio_id: espacio.id,
                fecha: request.fecha,
                hora_inicio: request.hora_inicio,
                hora_fin: request.hora_fin,
                precio_total,
                notas: request.notas.as_deref(),
            })
            .await?;

        let mut response = ReservaResponse::from(reserva);
        response.espacio_nombre = Some(espacio.nombre);
        Ok(response)
    }

    pub async fn cancelar(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: CancelarReservaRequest,
    ) -> Result<ReservaResponse, AppError> {
        let reserva = self
            .reservas
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Reserva", &id.to_string()))?;

        validar_cancelacion(&reserva, user.user_id)?;

        let cancelada = self
            .reservas
            .cancelar(id, request.motivo.as_deref().map(str::trim))
            .await?
            .ok_or_else(|| not_found_error("Reserva", &id.to_string()))?;

        log::info!("🚫 Reserva {} cancelada por {} ({})", id, user.email, user.user_id);
        Ok(cancelada.into())
    }
}
