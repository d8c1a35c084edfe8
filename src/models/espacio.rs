//! Modelo de Espacio Deportivo
//!
//! Este módulo contiene el struct Espacio, sus colecciones hijas
//! (características, imágenes, horarios) y los estados de su ciclo de vida.
//! Mapea exactamente a `espacios_deportivos` y sus tablas asociadas.

use chrono::{DateTime, NaiveTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Estado del espacio (`estado_espacio`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoEspacio {
    Pendiente,
    Activo,
    Inactivo,
}

impl EstadoEspacio {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoEspacio::Pendiente => "pendiente",
            EstadoEspacio::Activo => "activo",
            EstadoEspacio::Inactivo => "inactivo",
        }
    }
}

impl fmt::Display for EstadoEspacio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoEspacio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(EstadoEspacio::Pendiente),
            "activo" => Ok(EstadoEspacio::Activo),
            "inactivo" => Ok(EstadoEspacio::Inactivo),
            other => Err(format!("estado de espacio desconocido: {}", other)),
        }
    }
}

/// Tipos de espacio aceptados en el filtro y en el wizard
pub const TIPOS_ESPACIO: &[&str] = &[
    "futbol",
    "tenis",
    "padel",
    "basquetbol",
    "voleibol",
    "natacion",
    "gimnasio",
    "multiuso",
    "otro",
];

/// Espacio deportivo - fila de `espacios_deportivos`
#[derive(Debug, Clone, FromRow)]
pub struct Espacio {
    pub id: Uuid,
    pub propietario_id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tipo: String,
    pub direccion: String,
    pub ciudad: String,
    pub region: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub precio_hora: Decimal,
    pub capacidad: i32,
    pub estado_espacio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub imagen_principal: Option<String>,
}

impl Espacio {
    pub fn estado(&self) -> Option<EstadoEspacio> {
        self.estado_espacio.parse().ok()
    }

    pub fn is_active(&self) -> bool {
        self.estado() == Some(EstadoEspacio::Activo)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Caracteristica {
    pub id: Uuid,
    pub espacio_id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImagenEspacio {
    pub id: Uuid,
    pub espacio_id: Uuid,
    pub url: String,
    pub es_principal: bool,
    pub orden: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HorarioEspacio {
    pub id: Uuid,
    pub espacio_id: Uuid,
    pub dia_semana: i16,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub disponible: bool,
}

/// Response de espacio para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EspacioResponse {
    pub id: Uuid,
    pub propietario_id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tipo: String,
    pub direccion: String,
    pub ciudad: String,
    pub region: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub precio_hora: f64,
    pub capacidad: i32,
    pub estado_espacio: String,
    pub imagen_principal: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Espacio> for EspacioResponse {
    fn from(espacio: Espacio) -> Self {
        Self {
            id: espacio.id,
            propietario_id: espacio.propietario_id,
            nombre: espacio.nombre,
            descripcion: espacio.descripcion,
            tipo: espacio.tipo,
            direccion: espacio.direccion,
            ciudad: espacio.ciudad,
            region: espacio.region,
            latitud: espacio.latitud,
            longitud: espacio.longitud,
            precio_hora: espacio.precio_hora.to_f64().unwrap_or(0.0),
            capacidad: espacio.capacidad,
            estado_espacio: espacio.estado_espacio,
            imagen_principal: espacio.imagen_principal,
            created_at: espacio.created_at,
            updated_at: espacio.updated_at,
        }
    }
}

/// Detalle completo con las colecciones hijas
#[derive(Debug, Clone, Serialize)]
pub struct EspacioDetalle {
    #[serde(flatten)]
    pub espacio: EspacioResponse,
    pub caracteristicas: Vec<Caracteristica>,
    pub imagenes: Vec<ImagenEspacio>,
    pub horarios: Vec<HorarioEspacio>,
}
