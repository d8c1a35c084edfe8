//! Modelos de estadísticas
//!
//! Resultados de las vistas y funciones agregadas que viven en la base de datos.
//! Todos implementan `Default`, que es la respuesta de respaldo con valores cero.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Resultado de `obtener_estadisticas_espacio($1)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EstadisticasEspacio {
    pub total_reservas: i64,
    pub reservas_confirmadas: i64,
    pub reservas_canceladas: i64,
    pub reservas_completadas: i64,
    pub ingresos_totales: f64,
    pub tasa_ocupacion: f64,
}

/// Fila de `vista_ocupacion_espacios`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OcupacionFranja {
    pub dia_semana: i32,
    pub hora: i32,
    pub total_reservas: i64,
    pub porcentaje_ocupacion: f64,
}

/// Fila de `obtener_tendencias_espacio($1, $2)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TendenciaMensual {
    pub mes: String,
    pub total_reservas: i64,
    pub ingresos: f64,
}

/// Resultado de `obtener_resumen_propietario($1)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumenPropietario {
    pub total_espacios: i64,
    pub espacios_activos: i64,
    pub espacios_pendientes: i64,
    pub total_reservas: i64,
    pub reservas_pendientes: i64,
    pub ingresos_mes: f64,
    pub ingresos_totales: f64,
}

/// Fila única de `vista_estadisticas_admin`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EstadisticasAdmin {
    pub total_usuarios: i64,
    pub total_propietarios: i64,
    pub total_espacios: i64,
    pub espacios_pendientes: i64,
    pub total_reservas: i64,
    pub ingresos_totales: f64,
    pub incidencias_abiertas: i64,
    pub mensajes_sin_leer: i64,
}

/// Envoltorio de la respuesta de estadísticas de un espacio
#[derive(Debug, Clone, Serialize)]
pub struct EstadisticasEspacioResponse<T: Serialize> {
    pub espacio_id: Uuid,
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_are_zero() {
        let admin = EstadisticasAdmin::default();
        assert_eq!(admin.total_usuarios, 0);
        assert_eq!(admin.ingresos_totales, 0.0);

        let json = serde_json::to_value(ResumenPropietario::default()).unwrap();
        assert_eq!(json["total_espacios"], 0);
        assert_eq!(json["ingresos_mes"], 0.0);
    }
}
