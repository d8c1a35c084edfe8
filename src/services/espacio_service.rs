//! Creación de espacios
//!
//! Inserta la fila del espacio y luego, en secuencia, sus características,
//! imágenes y horarios. Las inserciones hijas son best-effort: un fallo se
//! registra en `advertencias` y el espacio se conserva (no hay rollback).

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    dto::espacio_dto::{CaracteristicaInput, CreacionEspacioResponse, HorarioInput, ImagenInput},
    models::espacio::{Caracteristica, Espacio, HorarioEspacio, ImagenEspacio},
    services::wizard::NuevoEspacio,
    utils::errors::AppError,
};

/// Escritura de un espacio y sus filas hijas
#[async_trait]
pub trait EspacioWriter: Send + Sync {
    async fn insertar_espacio(
        &self,
        propietario_id: Uuid,
        nuevo: &NuevoEspacio,
    ) -> Result<Espacio, AppError>;

    async fn insertar_caracteristica(
        &self,
        espacio_id: Uuid,
        caracteristica: &CaracteristicaInput,
    ) -> Result<Caracteristica, AppError>;

    async fn insertar_imagen(
        &self,
        espacio_id: Uuid,
        imagen: &ImagenInput,
        orden: i32,
    ) -> Result<ImagenEspacio, AppError>;

    async fn insertar_horario(
        &self,
        espacio_id: Uuid,
        horario: &HorarioInput,
    ) -> Result<HorarioEspacio, AppError>;
}

pub struct EspacioService<W> {
    writer: W,
}

impl<W: EspacioWriter> EspacioService<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub async fn crear(
        &self,
        propietario_id: Uuid,
        nuevo: NuevoEspacio,
    ) -> Result<CreacionEspacioResponse, AppError> {
        let espacio = self.writer.insertar_espacio(propietario_id, &nuevo).await?;
        let espacio_id = espacio.id;
        tracing::info!("🏟️ Espacio {} creado por {}", espacio_id, propietario_id);

        let mut advertencias = Vec::new();

        let mut caracteristicas = Vec::with_capacity(nuevo.caracteristicas.len());
        for caracteristica in &nuevo.caracteristicas {
            match self
                .writer
                .insertar_caracteristica(espacio_id, caracteristica)
                .await
            {
                Ok(fila) => caracteristicas.push(fila),
                Err(e) => {
                    tracing::warn!("⚠️ Característica '{}' no guardada: {}", caracteristica.nombre, e);
                    advertencias.push(format!(
                        "No se pudo guardar la característica '{}'",
                        caracteristica.nombre
                    ));
                }
            }
        }

        let mut imagenes = Vec::with_capacity(nuevo.imagenes.len());
        for (orden, imagen) in nuevo.imagenes.iter().enumerate() {
            match self
                .writer
                .insertar_imagen(espacio_id, imagen, orden as i32)
                .await
            {
                Ok(fila) => imagenes.push(fila),
                Err(e) => {
                    tracing::warn!("⚠️ Imagen {} no guardada: {}", imagen.url, e);
                    advertencias.push(format!("No se pudo guardar la imagen {}", orden + 1));
                }
            }
        }

        let mut horarios = Vec::with_capacity(nuevo.horarios.len());
        for horario in &nuevo.horarios {
            match self.writer.insertar_horario(espacio_id, horario).await {
                Ok(fila) => horarios.push(fila),
                Err(e) => {
                    tracing::warn!("⚠️ Horario del día {} no guardado: {}", horario.dia_semana, e);
                    advertencias.push(format!(
                        "No se pudo guardar el horario del día {} ({}-{})",
                        horario.dia_semana,
                        horario.hora_inicio.format("%H:%M"),
                        horario.hora_fin.format("%H:%M")
                    ));
                }
            }
        }

        let mut espacio = espacio;
        if espacio.imagen_principal.is_none() {
            espacio.imagen_principal = imagenes
                .iter()
                .find(|i| i.es_principal)
                .or_else(|| imagenes.first())
                .map(|i| i.url.clone());
        }

        Ok(CreacionEspacioResponse {
            espacio: espacio.into(),
            caracteristicas,
            imagenes,
            horarios,
            advertencias,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::wizard::{tests::borrador_completo, validar_borrador};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    /// Writer en memoria; cada `fallar_*` hace fallar ese tipo de fila
    #[derive(Default)]
    struct MemoriaWriter {
        fallar_caracteristicas: bool,
        fallar_imagenes: bool,
        fallar_espacio: bool,
        espacios: Mutex<Vec<Uuid>>,
        filas_hijas: Mutex<usize>,
    }

    #[async_trait]
    impl EspacioWriter for MemoriaWriter {
        async fn insertar_espacio(
            &self,
            propietario_id: Uuid,
            nuevo: &NuevoEspacio,
        ) -> Result<Espacio, AppError> {
            if self.fallar_espacio {
                return Err(AppError::Internal("sin conexión".into()));
            }
            let id = Uuid::new_v4();
            self.espacios.lock().unwrap().push(id);
            Ok(Espacio {
                id,
                propietario_id,
                nombre: nuevo.nombre.clone(),
                descripcion: nuevo.descripcion.clone(),
                tipo: nuevo.tipo.clone(),
                direccion: nuevo.direccion.clone(),
                ciudad: nuevo.ciudad.clone(),
                region: nuevo.region.clone(),
                latitud: nuevo.latitud,
                longitud: nuevo.longitud,
                precio_hora: nuevo.precio_hora,
                capacidad: nuevo.capacidad,
                estado_espacio: "pendiente".into(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
                imagen_principal: None,
            })
        }

        async fn insertar_caracteristica(
            &self,
            espacio_id: Uuid,
            caracteristica: &CaracteristicaInput,
        ) -> Result<Caracteristica, AppError> {
            if self.fallar_caracteristicas {
                return Err(AppError::Internal("tabla bloqueada".into()));
            }
            *self.filas_hijas.lock().unwrap() += 1;
            Ok(Caracteristica {
                id: Uuid::new_v4(),
                espacio_id,
                nombre: caracteristica.nombre.clone(),
                descripcion: caracteristica.descripcion.clone(),
            })
        }

        async fn insertar_imagen(
            &self,
            espacio_id: Uuid,
            imagen: &ImagenInput,
            orden: i32,
        ) -> Result<ImagenEspacio, AppError> {
            if self.fallar_imagenes {
                return Err(AppError::Internal("violación de constraint".into()));
            }
            *self.filas_hijas.lock().unwrap() += 1;
            Ok(ImagenEspacio {
                id: Uuid::new_v4(),
                espacio_id,
                url: imagen.url.clone(),
                es_principal: imagen.es_principal,
                orden,
            })
        }

        async fn insertar_horario(
            &self,
            espacio_id: Uuid,
            horario: &HorarioInput,
        ) -> Result<HorarioEspacio, AppError> {
            *self.filas_hijas.lock().unwrap() += 1;
            Ok(HorarioEspacio {
                id: Uuid::new_v4(),
                espacio_id,
                dia_semana: horario.dia_semana,
                hora_inicio: horario.hora_inicio,
                hora_fin: horario.hora_fin,
                disponible: true,
            })
        }
    }

    #[tokio::test]
    async fn test_creates_venue_with_children() {
        let service = EspacioService::new(MemoriaWriter::default());
        let nuevo = validar_borrador(&borrador_completo()).unwrap();

        let creado = service.crear(Uuid::new_v4(), nuevo).await.unwrap();
        assert!(creado.advertencias.is_empty());
        assert_eq!(creado.caracteristicas.len(), 2);
        assert_eq!(creado.imagenes.len(), 1);
        assert_eq!(creado.horarios.len(), 1);
        assert_eq!(creado.espacio.estado_espacio, "pendiente");
        assert_eq!(creado.espacio.precio_hora, 25000.0);
        assert_eq!(
            creado.espacio.imagen_principal.as_deref(),
            Some("https://cdn.example.com/espacios/robles.jpg")
        );
        assert_eq!(*service.writer.filas_hijas.lock().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_failed_child_insert_keeps_venue() {
        let writer = MemoriaWriter {
            fallar_imagenes: true,
            ..Default::default()
        };
        let service = EspacioService::new(writer);
        let nuevo = validar_borrador(&borrador_completo()).unwrap();

        let creado = service.crear(Uuid::new_v4(), nuevo).await.unwrap();

        // sin rollback: el espacio y las demás filas quedan
        assert_eq!(service.writer.espacios.lock().unwrap().len(), 1);
        assert!(creado.imagenes.is_empty());
        assert_eq!(creado.caracteristicas.len(), 2);
        assert_eq!(creado.horarios.len(), 1);
        assert_eq!(creado.advertencias, vec!["No se pudo guardar la imagen 1".to_string()]);
        assert!(creado.espacio.imagen_principal.is_none());
    }

    #[tokio::test]
    async fn test_failed_characteristics_keep_venue_images_and_schedules() {
        let writer = MemoriaWriter {
            fallar_caracteristicas: true,
            ..Default::default()
        };
        let service = EspacioService::new(writer);
        let nuevo = validar_borrador(&borrador_completo()).unwrap();

        let creado = service.crear(Uuid::new_v4(), nuevo).await.unwrap();

        assert_eq!(service.writer.espacios.lock().unwrap().len(), 1);
        assert_eq!(creado.espacio.id, service.writer.espacios.lock().unwrap()[0]);
        assert!(creado.caracteristicas.is_empty());
        assert_eq!(creado.imagenes.len(), 1);
        assert_eq!(creado.horarios.len(), 1);
        assert_eq!(*service.writer.filas_hijas.lock().unwrap(), 2);
        assert_eq!(
            creado.advertencias,
            vec![
                "No se pudo guardar la característica 'Estacionamiento'".to_string(),
                "No se pudo guardar la característica 'Camarines'".to_string(),
            ]
        );
        assert_eq!(
            creado.espacio.imagen_principal.as_deref(),
            Some("https://cdn.example.com/espacios/robles.jpg")
        );
    }

    #[tokio::test]
    async fn test_failed_venue_insert_is_an_error() {
        let writer = MemoriaWriter {
            fallar_espacio: true,
            ..Default::default()
        };
        let service = EspacioService::new(writer);
        let mut nuevo = validar_borrador(&borrador_completo()).unwrap();
        nuevo.precio_hora = Decimal::new(1999, 2);

        assert!(service.crear(Uuid::new_v4(), nuevo).await.is_err());
        assert_eq!(*service.writer.filas_hijas.lock().unwrap(), 0);
    }
}
