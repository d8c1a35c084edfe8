use crate::models::estadisticas::{
    EstadisticasEspacio, EstadisticasEspacioResponse, OcupacionFranja, TendenciaMensual,
};
use crate::repositories::estadisticas_repository::{meses_tendencia, EstadisticasRepository};
use sqlx::PgPool;
use uuid::Uuid;

/// Estadísticas públicas de un espacio; nunca fallan, en el peor caso son ceros
pub struct EstadisticasController {
    repository: EstadisticasRepository,
}

impl EstadisticasController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EstadisticasRepository::new(pool),
        }
    }

    pub async fn espacio(&self, espacio_id: Uuid) -> EstadisticasEspacioResponse<EstadisticasEspacio> {
        EstadisticasEspacioResponse {
            espacio_id,
            data: self.repository.estadisticas_espacio(espacio_id).await,
        }
    }

    pub async fn ocupacion(&self, espacio_id: Uuid) -> EstadisticasEspacioResponse<Vec<OcupacionFranja>> {
        EstadisticasEspacioResponse {
            espacio_id,
            data: self.repository.ocupacion_espacio(espacio_id).await,
        }
    }

    pub async fn tendencias(
        &self,
        espacio_id: Uuid,
        meses: Option<i32>,
    ) -> EstadisticasEspacioResponse<Vec<TendenciaMensual>> {
        EstadisticasEspacioResponse {
            espacio_id,
            data: self
                .repository
                .tendencias_espacio(espacio_id, meses_tendencia(meses))
                .await,
        }
    }
}
