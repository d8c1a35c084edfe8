use crate::dto::incidencia_dto::CrearIncidenciaRequest;
use crate::models::incidencia::{EstadoIncidencia, Incidencia};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

const INCIDENCIA_COLUMNS: &str = "id, usuario_id, reserva_id, tipo, asunto, descripcion, estado, \
                                  respuesta, created_at, updated_at";

pub struct IncidenciaRepository {
    pool: PgPool,
}

impl IncidenciaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Incidencia>, AppError> {
        let fila = sqlx::query_as::<_, Incidencia>(&format!(
            "SELECT {} FROM incidencias WHERE id = $1",
            INCIDENCIA_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fila)
    }

    pub async fn find_by_usuario(&self, usuario_id: Uuid) -> Result<Vec<Incidencia>, AppError> {
        let filas = sqlx::query_as::<_, Incidencia>(&format!(
            "SELECT {} FROM incidencias WHERE usuario_id = $1 ORDER BY created_at DESC",
            INCIDENCIA_COLUMNS
        ))
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    pub async fn find_all(&self) -> Result<Vec<Incidencia>, AppError> {
        let filas = sqlx::query_as::<_, Incidencia>(&format!(
            "SELECT {} FROM incidencias ORDER BY created_at DESC",
            INCIDENCIA_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    pub async fn create(
        &self,
        usuario_id: Uuid,
        incidencia: &CrearIncidenciaRequest,
    ) -> Result<Incidencia, AppError> {
        let fila = sqlx::query_as::<_, Incidencia>(&format!(
            r#"
            INSERT INTO incidencias (usuario_id, reserva_id, tipo, asunto, descripcion, estado)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            INCIDENCIA_COLUMNS
        ))
        .bind(usuario_id)
        .bind(incidencia.reserva_id)
        .bind(incidencia.tipo.as_str())
        .bind(incidencia.asunto.trim())
        .bind(incidencia.descripcion.trim())
        .bind(EstadoIncidencia::Pendiente.as_str())
        .fetch_one(&self.pool)
        .await?;

        log::info!("🎫 Incidencia {} abierta por {}", fila.id, usuario_id);
        Ok(fila)
    }

    pub async fn update_estado(
        &self,
        id: Uuid,
        estado: EstadoIncidencia,
        respuesta: Option<&str>,
    ) -> Result<Option<Incidencia>, AppError> {
        let fila = sqlx::query_as::<_, Incidencia>(&format!(
            r#"
            UPDATE incidencias
            SET estado = $2, respuesta = COALESCE($3, respuesta), updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INCIDENCIA_COLUMNS
        ))
        .bind(id)
        .bind(estado.as_str())
        .bind(respuesta)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fila)
    }
}
