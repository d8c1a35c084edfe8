use crate::dto::contacto_dto::{ActualizarMensajeRequest, CrearMensajeContactoRequest};
use crate::models::contacto::MensajeContacto;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

const MENSAJE_COLUMNS: &str = "id, nombre, email, asunto, mensaje, leido, respondido, created_at";

pub struct ContactoRepository {
    pool: PgPool,
}

impl ContactoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        mensaje: &CrearMensajeContactoRequest,
    ) -> Result<MensajeContacto, AppError> {
        let fila = sqlx::query_as::<_, MensajeContacto>(&format!(
            r#"
            INSERT INTO mensajes_contacto (nombre, email, asunto, mensaje)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            MENSAJE_COLUMNS
        ))
        .bind(mensaje.nombre.trim())
        .bind(mensaje.email.trim())
        .bind(mensaje.asunto.trim())
        .bind(mensaje.mensaje.trim())
        .fetch_one(&self.pool)
        .await?;

        log::info!("✉️ Mensaje de contacto {} recibido", fila.id);
        Ok(fila)
    }

    pub async fn find_all(&self) -> Result<Vec<MensajeContacto>, AppError> {
        let filas = sqlx::query_as::<_, MensajeContacto>(&format!(
            "SELECT {} FROM mensajes_contacto ORDER BY leido ASC, created_at DESC",
            MENSAJE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    pub async fn update_flags(
        &self,
        id: Uuid,
        cambios: &ActualizarMensajeRequest,
    ) -> Result<Option<MensajeContacto>, AppError> {
        let fila = sqlx::query_as::<_, MensajeContacto>(&format!(
            r#"
            UPDATE mensajes_contacto
            SET leido = COALESCE($2, leido),
                respondido = COALESCE($3, respondido)
            WHERE id = $1
            RETURNING {}
            "#,
            MENSAJE_COLUMNS
        ))
        .bind(id)
        .bind(cambios.leido)
        .bind(cambios.respondido)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fila)
    }
}
