use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::espacio::{
    Caracteristica, EspacioResponse, EstadoEspacio, HorarioEspacio, ImagenEspacio,
};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{deserialize_hora, validate_not_blank, validate_tipo_espacio};

pub const DEFAULT_PER_PAGE: i64 = 12;
pub const MAX_PER_PAGE: i64 = 50;
pub const MAX_PAGE: i64 = 10_000;

// Query string de `GET /api/espacios`
#[derive(Debug, Default, Deserialize)]
pub struct EspacioQuery {
    pub busqueda: Option<String>,
    pub tipo: Option<String>,
    pub ciudad: Option<String>,
    pub precio_min: Option<Decimal>,
    pub precio_max: Option<Decimal>,
    pub capacidad_min: Option<i32>,
    pub ordenar_por: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrdenEspacios {
    PrecioAsc,
    PrecioDesc,
    Capacidad,
    Nombre,
    #[default]
    Recientes,
}

impl OrdenEspacios {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "precio_asc" => Some(Self::PrecioAsc),
            "precio_desc" => Some(Self::PrecioDesc),
            "capacidad" => Some(Self::Capacidad),
            "nombre" => Some(Self::Nombre),
            "recientes" => Some(Self::Recientes),
            _ => None,
        }
    }

    pub fn order_clause(&self) -> &'static str {
        match self {
            Self::PrecioAsc => "e.precio_hora ASC",
            Self::PrecioDesc => "e.precio_hora DESC",
            Self::Capacidad => "e.capacidad DESC",
            Self::Nombre => "e.nombre ASC",
            Self::Recientes => "e.created_at DESC",
        }
    }
}

/// Filtros normalizados y validados del listado de espacios
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EspacioFilters {
    pub busqueda: Option<String>,
    pub tipo: Option<String>,
    pub ciudad: Option<String>,
    pub precio_min: Option<Decimal>,
    pub precio_max: Option<Decimal>,
    pub capacidad_min: Option<i32>,
    pub orden: OrdenEspacios,
    pub page: i64,
    pub per_page: i64,
}

impl EspacioFilters {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn precio_no_negativo(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Option<Decimal>, AppError> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Err(validation_error(field, "El precio debe ser un número positivo"))
        }
        other => Ok(other),
    }
}

impl TryFrom<EspacioQuery> for EspacioFilters {
    type Error = AppError;

    fn try_from(query: EspacioQuery) -> Result<Self, Self::Error> {
        let precio_min = precio_no_negativo("precio_min", query.precio_min)?;
        let precio_max = precio_no_negativo("precio_max", query.precio_max)?;
        if let (Some(min), Some(max)) = (precio_min, precio_max) {
            if min > max {
                return Err(validation_error(
                    "precio_min",
                    "precio_min no puede ser mayor que precio_max",
                ));
            }
        }

        if matches!(query.capacidad_min, Some(c) if c < 0) {
            return Err(validation_error("capacidad_min", "La capacidad no puede ser negativa"));
        }

        let tipo = non_empty(query.tipo).filter(|t| t != "todos");
        if let Some(t) = &tipo {
            if validate_tipo_espacio(t).is_err() {
                return Err(validation_error("tipo", "Tipo de espacio desconocido"));
            }
        }

        let orden = match non_empty(query.ordenar_por) {
            None => OrdenEspacios::default(),
            Some(raw) => OrdenEspacios::parse(&raw)
                .ok_or_else(|| validation_error("ordenar_por", "Orden desconocido"))?,
        };

        Ok(Self {
            busqueda: non_empty(query.busqueda),
            tipo,
            ciudad: non_empty(query.ciudad),
            precio_min,
            precio_max,
            capacidad_min: query.capacidad_min,
            orden,
            page: query.page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct EspacioListResponse {
    pub espacios: Vec<EspacioResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

// Secciones del wizard de creación

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InformacionBasica {
    #[validate(length(min = 3, max = 120), custom = "validate_not_blank")]
    pub nombre: String,

    #[validate(length(max = 2000))]
    pub descripcion: Option<String>,

    #[validate(custom = "validate_tipo_espacio")]
    pub tipo: String,

    #[validate(range(min = 1, max = 1000))]
    pub capacidad: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Ubicacion {
    #[validate(length(min = 5, max = 255), custom = "validate_not_blank")]
    pub direccion: String,

    #[validate(length(min = 2, max = 100), custom = "validate_not_blank")]
    pub ciudad: String,

    #[validate(length(max = 100))]
    pub region: Option<String>,

    #[validate(custom = "validate_latitud")]
    pub latitud: Option<f64>,

    #[validate(custom = "validate_longitud")]
    pub longitud: Option<f64>,
}

fn validate_coordenada(value: f64, limite: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value.abs() > limite {
        let mut error = ValidationError::new("coordenada");
        error.add_param("limite".into(), &limite);
        return Err(error);
    }
    Ok(())
}

fn validate_latitud(value: f64) -> Result<(), ValidationError> {
    validate_coordenada(value, 90.0)
}

fn validate_longitud(value: f64) -> Result<(), ValidationError> {
    validate_coordenada(value, 180.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CaracteristicaInput {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub nombre: String,

    #[validate(length(max = 500))]
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Precios {
    #[validate(range(min = 1.0, max = 10000000.0, message = "El precio por hora debe ser mayor que cero"))]
    pub precio_hora: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_franja"))]
pub struct HorarioInput {
    #[validate(range(min = 0, max = 6))]
    pub dia_semana: i16,

    #[serde(deserialize_with = "deserialize_hora")]
    pub hora_inicio: NaiveTime,

    #[serde(deserialize_with = "deserialize_hora")]
    pub hora_fin: NaiveTime,
}

fn validate_franja(horario: &HorarioInput) -> Result<(), ValidationError> {
    if horario.hora_inicio >= horario.hora_fin {
        let mut error = ValidationError::new("franja");
        error.message = Some("La hora de inicio debe ser anterior a la de término".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ImagenInput {
    #[validate(url(message = "URL de imagen inválida"))]
    pub url: String,

    #[serde(default)]
    pub es_principal: bool,
}

/// Objeto parcial que el wizard va acumulando paso a paso
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorradorEspacio {
    #[serde(default)]
    pub informacion_basica: Option<InformacionBasica>,
    #[serde(default)]
    pub ubicacion: Option<Ubicacion>,
    #[serde(default)]
    pub caracteristicas: Option<Vec<CaracteristicaInput>>,
    #[serde(default)]
    pub precios: Option<Precios>,
    #[serde(default)]
    pub horarios: Option<Vec<HorarioInput>>,
    #[serde(default)]
    pub imagenes: Option<Vec<ImagenInput>>,
}

// Respuesta de la creación: filas hijas insertadas y fallos parciales
#[derive(Debug, Serialize)]
pub struct CreacionEspacioResponse {
    pub espacio: EspacioResponse,
    pub caracteristicas: Vec<Caracteristica>,
    pub imagenes: Vec<ImagenEspacio>,
    pub horarios: Vec<HorarioEspacio>,
    pub advertencias: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CambiarEstadoEspacioRequest {
    pub estado: EstadoEspacio,
}

#[derive(Debug, Default, Deserialize)]
pub struct TendenciasQuery {
    pub meses: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_filters_defaults() {
        let filters = EspacioFilters::try_from(EspacioQuery::default()).unwrap();
        assert_eq!(filters.page, 1);
        assert_eq!(filters.per_page, DEFAULT_PER_PAGE);
        assert_eq!(filters.orden, OrdenEspacios::Recientes);
        assert_eq!(filters.offset(), 0);
    }

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn query_from(uri: &str) -> EspacioQuery {
        let uri: axum::http::Uri = uri.parse().unwrap();
        axum::extract::Query::<EspacioQuery>::try_from_uri(&uri)
            .unwrap()
            .0
    }

    #[test]
    fn test_filters_price_range() {
        let filters = EspacioFilters::try_from(EspacioQuery {
            precio_min: Some(dec("10000")),
            precio_max: Some(dec("50000")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filters.precio_min, Some(dec("10000")));
        assert_eq!(filters.precio_max, Some(dec("50000")));

        let inverted = EspacioFilters::try_from(EspacioQuery {
            precio_min: Some(dec("50000")),
            precio_max: Some(dec("10000")),
            ..Default::default()
        });
        assert!(matches!(inverted, Err(AppError::Validation(_))));

        let negative = EspacioFilters::try_from(EspacioQuery {
            precio_min: Some(dec("-1")),
            ..Default::default()
        });
        assert!(negative.is_err());
    }

    #[test]
    fn test_price_bounds_from_query_string_are_exact() {
        let filters =
            EspacioFilters::try_from(query_from("/api/espacios?precio_min=19999.99&precio_max=19999.99"))
                .unwrap();
        assert_eq!(filters.precio_min, Some(dec("19999.99")));
        assert_eq!(filters.precio_max, Some(dec("19999.99")));

        // un espacio de 19999.99 queda dentro del rango inclusivo
        let precio = dec("19999.99");
        assert!(filters.precio_min.unwrap() <= precio && precio <= filters.precio_max.unwrap());
    }

    #[test]
    fn test_huge_page_does_not_overflow_offset() {
        let filters =
            EspacioFilters::try_from(query_from("/api/espacios?page=9223372036854775807&per_page=50"))
                .unwrap();
        assert_eq!(filters.page, MAX_PAGE);
        assert_eq!(filters.offset(), (MAX_PAGE - 1) * 50);

        let unclamped = EspacioFilters {
            page: i64::MAX,
            per_page: MAX_PER_PAGE,
            ..Default::default()
        };
        assert_eq!(unclamped.offset(), i64::MAX);
    }

    #[test]
    fn test_filters_clamp_pagination_and_trim() {
        let filters = EspacioFilters::try_from(EspacioQuery {
            busqueda: Some("   ".into()),
            ciudad: Some(" Santiago ".into()),
            tipo: Some("todos".into()),
            page: Some(0),
            per_page: Some(500),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filters.busqueda, None);
        assert_eq!(filters.ciudad.as_deref(), Some("Santiago"));
        assert_eq!(filters.tipo, None);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_filters_reject_unknown_order_and_type() {
        assert!(EspacioFilters::try_from(EspacioQuery {
            ordenar_por: Some("aleatorio".into()),
            ..Default::default()
        })
        .is_err());
        assert!(EspacioFilters::try_from(EspacioQuery {
            tipo: Some("ajedrez".into()),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_horario_requires_start_before_end() {
        let horario: HorarioInput = serde_json::from_value(serde_json::json!({
            "dia_semana": 1, "hora_inicio": "20:00", "hora_fin": "08:00"
        }))
        .unwrap();
        assert!(horario.validate().is_err());

        let horario: HorarioInput = serde_json::from_value(serde_json::json!({
            "dia_semana": 7, "hora_inicio": "08:00", "hora_fin": "20:00"
        }))
        .unwrap();
        assert!(horario.validate().is_err());
    }

    #[test]
    fn test_coordinates_out_of_range_are_rejected() {
        let ubicacion = |latitud: Option<f64>, longitud: Option<f64>| Ubicacion {
            direccion: "Av. Collao 1202".to_string(),
            ciudad: "Concepción".to_string(),
            region: None,
            latitud,
            longitud,
        };

        assert!(ubicacion(Some(-36.82), Some(-73.04)).validate().is_ok());
        assert!(ubicacion(None, None).validate().is_ok());

        let errores = ubicacion(Some(91.0), Some(-181.0)).validate().unwrap_err();
        let campos = errores.field_errors();
        assert!(campos.contains_key("latitud"));
        assert!(campos.contains_key("longitud"));
        assert!(ubicacion(Some(f64::NAN), None).validate().is_err());
    }
}
