//! Wizard de creación de espacios
//!
//! Siete pasos lineales: información básica → ubicación → características →
//! precios → horarios → imágenes → resumen. El borrador se acumula entre
//! pasos y se valida por secciones. Se puede retroceder o saltar a cualquier
//! paso ya completado, pero nunca avanzar más allá del paso actual sin validarlo.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::dto::espacio_dto::{
    BorradorEspacio, CaracteristicaInput, HorarioInput, ImagenInput, InformacionBasica, Precios,
    Ubicacion,
};
use crate::utils::errors::{single_field_errors, AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PasoWizard {
    InformacionBasica = 1,
    Ubicacion = 2,
    Caracteristicas = 3,
    Precios = 4,
    Horarios = 5,
    Imagenes = 6,
    Resumen = 7,
}

impl PasoWizard {
    pub const TODOS: [PasoWizard; 7] = [
        PasoWizard::InformacionBasica,
        PasoWizard::Ubicacion,
        PasoWizard::Caracteristicas,
        PasoWizard::Precios,
        PasoWizard::Horarios,
        PasoWizard::Imagenes,
        PasoWizard::Resumen,
    ];

    pub fn numero(&self) -> u8 {
        *self as u8
    }

    pub fn siguiente(&self) -> Option<PasoWizard> {
        PasoWizard::try_from(self.numero() + 1).ok()
    }

    pub fn anterior(&self) -> Option<PasoWizard> {
        self.numero()
            .checked_sub(1)
            .and_then(|n| PasoWizard::try_from(n).ok())
    }
}

impl TryFrom<u8> for PasoWizard {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PasoWizard::TODOS
            .get((value as usize).wrapping_sub(1))
            .copied()
            .ok_or_else(|| format!("paso {} fuera de rango (1-7)", value))
    }
}

impl From<PasoWizard> for u8 {
    fn from(paso: PasoWizard) -> Self {
        paso.numero()
    }
}

impl fmt::Display for PasoWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.numero())
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("el paso {paso} está incompleto")]
    Invalido {
        paso: PasoWizard,
        errores: ValidationErrors,
    },

    #[error("no se puede ir del paso {desde} al paso {hacia}")]
    NavegacionNoPermitida { desde: PasoWizard, hacia: PasoWizard },

    #[error("solo se puede confirmar desde el resumen")]
    FueraDeResumen,
}

impl From<WizardError> for AppError {
    fn from(error: WizardError) -> Self {
        match error {
            WizardError::Invalido { paso, errores } => AppError::InvalidStep {
                paso: paso.numero(),
                errors: errores,
            },
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

/// Datos ya validados, listos para insertar
#[derive(Debug, Clone, PartialEq)]
pub struct NuevoEspacio {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tipo: String,
    pub capacidad: i32,
    pub direccion: String,
    pub ciudad: String,
    pub region: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub precio_hora: Decimal,
    pub caracteristicas: Vec<CaracteristicaInput>,
    pub horarios: Vec<HorarioInput>,
    pub imagenes: Vec<ImagenInput>,
}

fn invalido(paso: PasoWizard, errores: ValidationErrors) -> WizardError {
    WizardError::Invalido { paso, errores }
}

fn requerido<'a, T>(
    paso: PasoWizard,
    seccion: &'a Option<T>,
    campo: &'static str,
) -> Result<&'a T, WizardError> {
    seccion
        .as_ref()
        .ok_or_else(|| invalido(paso, single_field_errors(campo, "Sección requerida")))
}

fn validar_lista<T: Validate>(
    paso: PasoWizard,
    items: &[T],
    campo: &'static str,
) -> Result<(), WizardError> {
    if items.is_empty() {
        return Err(invalido(paso, single_field_errors(campo, "Agrega al menos un elemento")));
    }
    for item in items {
        item.validate().map_err(|e| invalido(paso, e))?;
    }
    Ok(())
}

/// Valida la sección correspondiente a un paso
pub fn validar_paso(paso: PasoWizard, borrador: &BorradorEspacio) -> Result<(), WizardError> {
    match paso {
        PasoWizard::InformacionBasica => {
            let info: &InformacionBasica =
                requerido(paso, &borrador.informacion_basica, "informacion_basica")?;
            info.validate().map_err(|e| invalido(paso, e))
        }
        PasoWizard::Ubicacion => {
            let ubicacion: &Ubicacion = requerido(paso, &borrador.ubicacion, "ubicacion")?;
            ubicacion.validate().map_err(|e| invalido(paso, e))
        }
        PasoWizard::Caracteristicas => {
            let lista = requerido(paso, &borrador.caracteristicas, "caracteristicas")?;
            validar_lista(paso, lista, "caracteristicas")
        }
        PasoWizard::Precios => {
            let precios: &Precios = requerido(paso, &borrador.precios, "precios")?;
            precios.validate().map_err(|e| invalido(paso, e))
        }
        PasoWizard::Horarios => {
            let lista = requerido(paso, &borrador.horarios, "horarios")?;
            validar_lista(paso, lista, "horarios")
        }
        PasoWizard::Imagenes => {
            let lista = requerido(paso, &borrador.imagenes, "imagenes")?;
            validar_lista(paso, lista, "imagenes")?;
            if lista.iter().filter(|i| i.es_principal).count() > 1 {
                return Err(invalido(
                    paso,
                    single_field_errors("imagenes", "Solo puede haber una imagen principal"),
                ));
            }
            Ok(())
        }
        PasoWizard::Resumen => Ok(()),
    }
}

/// Valida todos los pasos en orden y arma el espacio a insertar
pub fn validar_borrador(borrador: &BorradorEspacio) -> Result<NuevoEspacio, WizardError> {
    for paso in PasoWizard::TODOS {
        validar_paso(paso, borrador)?;
    }

    let (Some(info), Some(ubicacion), Some(caracteristicas), Some(precios), Some(horarios), Some(imagenes)) = (
        borrador.informacion_basica.clone(),
        borrador.ubicacion.clone(),
        borrador.caracteristicas.clone(),
        borrador.precios.clone(),
        borrador.horarios.clone(),
        borrador.imagenes.clone(),
    ) else {
        // validar_paso ya exige todas las secciones
        return Err(WizardError::FueraDeResumen);
    };

    // sin el error binario del f64: 19999.99 queda 19999.99
    let precio_hora = Decimal::from_f64(precios.precio_hora)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| {
            invalido(
                PasoWizard::Precios,
                single_field_errors("precio_hora", "Precio inválido"),
            )
        })?;

    Ok(NuevoEspacio {
        nombre: info.nombre.trim().to_string(),
        descripcion: info.descripcion,
        tipo: info.tipo,
        capacidad: info.capacidad,
        direccion: ubicacion.direccion.trim().to_string(),
        ciudad: ubicacion.ciudad.trim().to_string(),
        region: ubicacion.region,
        latitud: ubicacion.latitud,
        longitud: ubicacion.longitud,
        precio_hora,
        caracteristicas,
        horarios,
        imagenes,
    })
}

/// Estado de navegación del wizard, ida y vuelta con el cliente en cada paso
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    pub paso_actual: PasoWizard,
    #[serde(default)]
    pub completados: BTreeSet<PasoWizard>,
    #[serde(default)]
    pub borrador: BorradorEspacio,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            paso_actual: PasoWizard::InformacionBasica,
            completados: BTreeSet::new(),
            borrador: BorradorEspacio::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum AccionWizard {
    Siguiente,
    Anterior,
    IrA { paso: PasoWizard },
}

/// Cuerpo de `POST /api/espacios/borrador/paso`
#[derive(Debug, Deserialize)]
pub struct PasoWizardRequest {
    #[serde(default)]
    pub estado: WizardState,
    pub accion: AccionWizard,
}

impl WizardState {
    /// Valida el paso actual, lo marca completado y avanza
    pub fn siguiente(&mut self) -> Result<(), WizardError> {
        validar_paso(self.paso_actual, &self.borrador)?;
        self.completados.insert(self.paso_actual);
        if let Some(siguiente) = self.paso_actual.siguiente() {
            self.paso_actual = siguiente;
        }
        Ok(())
    }

    pub fn anterior(&mut self) {
        if let Some(anterior) = self.paso_actual.anterior() {
            self.paso_actual = anterior;
        }
    }

    pub fn puede_ir_a(&self, destino: PasoWizard) -> bool {
        destino <= self.paso_actual || self.completados.contains(&destino)
    }

    /// Saltar hacia adelante exige que el borrador pase todos los pasos previos:
    /// `completados` viene del cliente y no basta por sí solo.
    pub fn ir_a(&mut self, destino: PasoWizard) -> Result<(), WizardError> {
        if !self.puede_ir_a(destino) {
            return Err(WizardError::NavegacionNoPermitida {
                desde: self.paso_actual,
                hacia: destino,
            });
        }
        if destino > self.paso_actual {
            for paso in PasoWizard::TODOS.into_iter().filter(|p| *p < destino) {
                validar_paso(paso, &self.borrador)?;
            }
        }
        self.paso_actual = destino;
        Ok(())
    }

    pub fn aplicar(&mut self, accion: AccionWizard) -> Result<(), WizardError> {
        match accion {
            AccionWizard::Siguiente => self.siguiente(),
            AccionWizard::Anterior => {
                self.anterior();
                Ok(())
            }
            AccionWizard::IrA { paso } => self.ir_a(paso),
        }
    }

    /// Solo desde el resumen; vuelve a validar todo el borrador
    pub fn confirmar(&self) -> Result<NuevoEspacio, WizardError> {
        if self.paso_actual != PasoWizard::Resumen {
            return Err(WizardError::FueraDeResumen);
        }
        validar_borrador(&self.borrador)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveTime;

    pub(crate) fn borrador_completo() -> BorradorEspacio {
        BorradorEspacio {
            informacion_basica: Some(InformacionBasica {
                nombre: "Cancha Los Robles".into(),
                descripcion: Some("Pasto sintético, iluminación LED".into()),
                tipo: "futbol".into(),
                capacidad: 14,
            }),
            ubicacion: Some(Ubicacion {
                direccion: "Av. Los Robles 1234".into(),
                ciudad: "Concepción".into(),
                region: Some("Biobío".into()),
                latitud: Some(-36.82),
                longitud: Some(-73.04),
            }),
            caracteristicas: Some(vec![
                CaracteristicaInput {
                    nombre: "Estacionamiento".into(),
                    descripcion: None,
                },
                CaracteristicaInput {
                    nombre: "Camarines".into(),
                    descripcion: Some("Con duchas".into()),
                },
            ]),
            precios: Some(Precios { precio_hora: 25000.0 }),
            horarios: Some(vec![HorarioInput {
                dia_semana: 1,
                hora_inicio: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                hora_fin: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            }]),
            imagenes: Some(vec![ImagenInput {
                url: "https://cdn.example.com/espacios/robles.jpg".into(),
                es_principal: true,
            }]),
        }
    }

    #[test]
    fn test_paso_numbering() {
        assert_eq!(PasoWizard::try_from(1).unwrap(), PasoWizard::InformacionBasica);
        assert_eq!(PasoWizard::try_from(7).unwrap(), PasoWizard::Resumen);
        assert!(PasoWizard::try_from(0).is_err());
        assert!(PasoWizard::try_from(8).is_err());
        assert_eq!(PasoWizard::Resumen.siguiente(), None);
        assert_eq!(PasoWizard::InformacionBasica.anterior(), None);
    }

    #[test]
    fn test_cannot_advance_with_invalid_step() {
        let mut state = WizardState::default();
        let err = state.siguiente().unwrap_err();
        assert!(matches!(
            err,
            WizardError::Invalido {
                paso: PasoWizard::InformacionBasica,
                ..
            }
        ));
        assert_eq!(state.paso_actual, PasoWizard::InformacionBasica);
        assert!(state.completados.is_empty());
    }

    #[test]
    fn test_full_walk_reaches_summary_and_confirms() {
        let mut state = WizardState {
            borrador: borrador_completo(),
            ..Default::default()
        };
        for _ in 0..6 {
            state.siguiente().unwrap();
        }
        assert_eq!(state.paso_actual, PasoWizard::Resumen);
        assert_eq!(state.completados.len(), 6);

        let nuevo = state.confirmar().unwrap();
        assert_eq!(nuevo.nombre, "Cancha Los Robles");
        assert_eq!(nuevo.precio_hora, Decimal::from(25000));
        assert_eq!(nuevo.caracteristicas.len(), 2);
    }

    #[test]
    fn test_navigation_rules() {
        let mut state = WizardState {
            borrador: borrador_completo(),
            ..Default::default()
        };
        state.siguiente().unwrap();
        state.siguiente().unwrap();
        assert_eq!(state.paso_actual, PasoWizard::Caracteristicas);

        // no se puede saltar hacia adelante
        assert!(matches!(
            state.ir_a(PasoWizard::Horarios),
            Err(WizardError::NavegacionNoPermitida { .. })
        ));

        state.ir_a(PasoWizard::InformacionBasica).unwrap();
        assert_eq!(state.paso_actual, PasoWizard::InformacionBasica);

        // el paso 2 ya está completado, se puede volver a él
        state.ir_a(PasoWizard::Ubicacion).unwrap();
        assert_eq!(state.paso_actual, PasoWizard::Ubicacion);

        state.anterior();
        state.anterior();
        assert_eq!(state.paso_actual, PasoWizard::InformacionBasica);
    }

    #[test]
    fn test_confirm_outside_summary_fails() {
        let state = WizardState {
            borrador: borrador_completo(),
            ..Default::default()
        };
        assert!(matches!(state.confirmar(), Err(WizardError::FueraDeResumen)));
    }

    #[test]
    fn test_single_main_image() {
        let mut borrador = borrador_completo();
        borrador.imagenes = Some(vec![
            ImagenInput {
                url: "https://cdn.example.com/a.jpg".into(),
                es_principal: true,
            },
            ImagenInput {
                url: "https://cdn.example.com/b.jpg".into(),
                es_principal: true,
            },
        ]);
        let err = validar_paso(PasoWizard::Imagenes, &borrador).unwrap_err();
        assert!(matches!(err, WizardError::Invalido { paso: PasoWizard::Imagenes, .. }));
    }

    #[test]
    fn test_validar_borrador_reports_first_missing_step() {
        let mut borrador = borrador_completo();
        borrador.precios = None;
        borrador.horarios = Some(vec![]);
        match validar_borrador(&borrador) {
            Err(WizardError::Invalido { paso, .. }) => assert_eq!(paso, PasoWizard::Precios),
            other => panic!("se esperaba error en precios, se obtuvo {:?}", other),
        }
    }

    #[test]
    fn test_state_round_trips_as_json() {
        let json = serde_json::json!({
            "paso_actual": 3,
            "completados": [1, 2],
            "borrador": {}
        });
        let state: WizardState = serde_json::from_value(json).unwrap();
        assert_eq!(state.paso_actual, PasoWizard::Caracteristicas);
        assert!(state.puede_ir_a(PasoWizard::Ubicacion));

        let back = serde_json::to_value(&state).unwrap();
        assert_eq!(back["paso_actual"], 3);

        let accion: AccionWizard =
            serde_json::from_value(serde_json::json!({ "tipo": "ir_a", "paso": 2 })).unwrap();
        assert_eq!(accion, AccionWizard::IrA { paso: PasoWizard::Ubicacion });
    }

    #[test]
    fn test_forged_completed_steps_do_not_skip_validation() {
        let mut state: WizardState = serde_json::from_value(serde_json::json!({
            "paso_actual": 1,
            "completados": [1, 2, 3, 4, 5, 6],
            "borrador": {}
        }))
        .unwrap();

        let err = state.ir_a(PasoWizard::Imagenes).unwrap_err();
        assert!(matches!(
            err,
            WizardError::Invalido {
                paso: PasoWizard::InformacionBasica,
                ..
            }
        ));
        assert_eq!(state.paso_actual, PasoWizard::InformacionBasica);

        state.borrador = borrador_completo();
        state.ir_a(PasoWizard::Imagenes).unwrap();
        assert_eq!(state.paso_actual, PasoWizard::Imagenes);
    }

    #[test]
    fn test_precio_hora_keeps_exact_cents() {
        let mut borrador = borrador_completo();
        borrador.precios = Some(Precios { precio_hora: 19999.99 });
        let nuevo = validar_borrador(&borrador).unwrap();
        assert_eq!(nuevo.precio_hora, "19999.99".parse::<Decimal>().unwrap());
    }
}
