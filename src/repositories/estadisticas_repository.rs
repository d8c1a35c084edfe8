//! Lectura de vistas y funciones de estadísticas
//!
//! Cada consulta se devuelve tal cual. Si falla (función ausente, timeout,
//! esquema distinto) se registra un warning y se responde con ceros.

use crate::models::estadisticas::{
    EstadisticasAdmin, EstadisticasEspacio, OcupacionFranja, ResumenPropietario, TendenciaMensual,
};
use sqlx::PgPool;
use uuid::Uuid;

pub const DEFAULT_MESES_TENDENCIA: i32 = 6;
pub const MAX_MESES_TENDENCIA: i32 = 24;

fn or_default<T: Default>(result: Result<T, sqlx::Error>, origen: &str) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("⚠️ {} no disponible, se devuelven ceros: {}", origen, e);
        T::default()
    })
}

pub struct EstadisticasRepository {
    pool: PgPool,
}

impl EstadisticasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn estadisticas_espacio(&self, espacio_id: Uuid) -> EstadisticasEspacio {
        let result = sqlx::query_as::<_, EstadisticasEspacio>(
            r#"
            SELECT COALESCE(total_reservas, 0)::bigint AS total_reservas,
                   COALESCE(reservas_confirmadas, 0)::bigint AS reservas_confirmadas,
                   COALESCE(reservas_canceladas, 0)::bigint AS reservas_canceladas,
                   COALESCE(reservas_completadas, 0)::bigint AS reservas_completadas,
                   COALESCE(ingresos_totales, 0)::float8 AS ingresos_totales,
                   COALESCE(tasa_ocupacion, 0)::float8 AS tasa_ocupacion
            FROM obtener_estadisticas_espacio($1)
            "#,
        )
        .bind(espacio_id)
        .fetch_optional(&self.pool)
        .await
        .map(Option::unwrap_or_default);

        or_default(result, "obtener_estadisticas_espacio")
    }

    pub async fn ocupacion_espacio(&self, espacio_id: Uuid) -> Vec<OcupacionFranja> {
        let result = sqlx::query_as::<_, OcupacionFranja>(
            r#"
            SELECT dia_semana::int4 AS dia_semana,
                   hora::int4 AS hora,
                   COALESCE(total_reservas, 0)::bigint AS total_reservas,
                   COALESCE(porcentaje_ocupacion, 0)::float8 AS porcentaje_ocupacion
            FROM vista_ocupacion_espacios
            WHERE espacio_id = $1
            ORDER BY dia_semana, hora
            "#,
        )
        .bind(espacio_id)
        .fetch_all(&self.pool)
        .await;

        or_default(result, "vista_ocupacion_espacios")
    }

    pub async fn tendencias_espacio(&self, espacio_id: Uuid, meses: i32) -> Vec<TendenciaMensual> {
        let result = sqlx::query_as::<_, TendenciaMensual>(
            r#"
            SELECT mes::text AS mes,
                   COALESCE(total_reservas, 0)::bigint AS total_reservas,
                   COALESCE(ingresos, 0)::float8 AS ingresos
            FROM obtener_tendencias_espacio($1, $2)
            "#,
        )
        .bind(espacio_id)
        .bind(meses)
        .fetch_all(&self.pool)
        .await;

        or_default(result, "obtener_tendencias_espacio")
    }

    pub async fn resumen_propietario(&self, propietario_id: Uuid) -> ResumenPropietario {
        let result = sqlx::query_as::<_, ResumenPropietario>(
            r#"
            SELECT COALESCE(total_espacios, 0)::bigint AS total_espacios,
                   COALESCE(espacios_activos, 0)::bigint AS espacios_activos,
                   COALESCE(espacios_pendientes, 0)::bigint AS espacios_pendientes,
                   COALESCE(total_reservas, 0)::bigint AS total_reservas,
                   COALESCE(reservas_pendientes, 0)::bigint AS reservas_pendientes,
                   COALESCE(ingresos_mes, 0)::float8 AS ingresos_mes,
                   COALESCE(ingresos_totales, 0)::float8 AS ingresos_totales
            FROM obtener_resumen_propietario($1)
            "#,
        )
        .bind(propietario_id)
        .fetch_optional(&self.pool)
        .await
        .map(Option::unwrap_or_default);

        or_default(result, "obtener_resumen_propietario")
    }

    pub async fn estadisticas_admin(&self) -> EstadisticasAdmin {
        let result = sqlx::query_as::<_, EstadisticasAdmin>(
            r#"
            SELECT COALESCE(total_usuarios, 0)::bigint AS total_usuarios,
                   COALESCE(total_propietarios, 0)::bigint AS total_propietarios,
                   COALESCE(total_espacios, 0)::bigint AS total_espacios,
                   COALESCE(espacios_pendientes, 0)::bigint AS espacios_pendientes,
                   COALESCE(total_reservas, 0)::bigint AS total_reservas,
                   COALESCE(ingresos_totales, 0)::float8 AS ingresos_totales,
                   COALESCE(incidencias_abiertas, 0)::bigint AS incidencias_abiertas,
                   COALESCE(mensajes_sin_leer, 0)::bigint AS mensajes_sin_leer
            FROM vista_estadisticas_admin
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map(Option::unwrap_or_default);

        or_default(result, "vista_estadisticas_admin")
    }
}

/// Meses de tendencia pedidos, acotados a 1..=24
pub fn meses_tendencia(meses: Option<i32>) -> i32 {
    meses
        .unwrap_or(DEFAULT_MESES_TENDENCIA)
        .clamp(1, MAX_MESES_TENDENCIA)
}
