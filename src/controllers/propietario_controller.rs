use crate::middleware::auth::AuthenticatedUser;
use crate::models::espacio::EspacioResponse;
use crate::models::estadisticas::ResumenPropietario;
use crate::models::reserva::ReservaResponse;
use crate::repositories::espacio_repository::EspacioRepository;
use crate::repositories::estadisticas_repository::EstadisticasRepository;
use crate::repositories::reserva_repository::ReservaRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Panel del propietario. En los listados un administrador ve los datos de
/// todos; el resumen siempre es el del propio usuario.
pub struct PropietarioController {
    espacios: EspacioRepository,
    reservas: ReservaRepository,
    estadisticas: EstadisticasRepository,
}

fn alcance(user: &AuthenticatedUser) -> Option<Uuid> {
    if user.role.is_admin() {
        None
    } else {
        Some(user.user_id)
    }
}

impl PropietarioController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            espacios: EspacioRepository::new(pool.clone()),
            reservas: ReservaRepository::new(pool.clone()),
            estadisticas: EstadisticasRepository::new(pool),
        }
    }

    pub async fn espacios(&self, user: &AuthenticatedUser) -> Result<Vec<EspacioResponse>, AppError> {
        user.require_owner()?;
        let espacios = self.espacios.find_by_propietario(alcance(user)).await?;
        Ok(espacios.into_iter().map(EspacioResponse::from).collect())
    }

    /// `obtener_resumen_propietario` agrega por propietario, así que un
    /// administrador recibe su propio resumen. La vista global está en
    /// `/api/admin/estadisticas`.
    pub async fn resumen(&self, user: &AuthenticatedUser) -> Result<ResumenPropietario, AppError> {
        user.require_owner()?;
        Ok(self.estadisticas.resumen_propietario(user.user_id).await)
    }

    pub async fn reservas(&self, user: &AuthenticatedUser) -> Result<Vec<ReservaResponse>, AppError> {
        user.require_owner()?;
        let reservas = self.reservas.find_by_propietario(alcance(user)).await?;
        Ok(reservas.into_iter().map(ReservaResponse::from).collect())
    }
}
