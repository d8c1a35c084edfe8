use crate::models::reserva::{EstadoReserva, Reserva};
use crate::utils::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const RESERVA_SELECT: &str = r#"
    SELECT r.id, r.usuario_id, r.espacio_id, r.fecha, r.hora_inicio, r.hora_fin,
           r.precio_total, r.estado, r.notas, r.motivo_cancelacion, r.fecha_cancelacion,
           r.created_at, e.nombre AS espacio_nombre
    FROM reservas r
    JOIN espacios_deportivos e ON e.id = r.espacio_id
"#;

const RESERVA_COLUMNS: &str = "id, usuario_id, espacio_id, fecha, hora_inicio, hora_fin, \
                               precio_total, estado, notas, motivo_cancelacion, \
                               fecha_cancelacion, created_at";

/// Datos de una reserva ya validada y con precio calculado
pub struct NuevaReserva<'a> {
    pub usuario_id: Uuid,
    pub espacio_id: Uuid,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub precio_total: Decimal,
    pub notas: Option<&'a str>,
}

pub struct ReservaRepository {
    pool: PgPool,
}

impl ReservaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reserva>, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>(&format!("{} WHERE r.id = $1", RESERVA_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reserva)
    }

    pub async fn find_by_usuario(&self, usuario_id: Uuid) -> Result<Vec<Reserva>, AppError> {
        let reservas = sqlx::query_as::<_, Reserva>(&format!(
            "{} WHERE r.usuario_id = $1 ORDER BY r.fecha DESC, r.hora_inicio DESC",
            RESERVA_SELECT
        ))
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservas)
    }

    /// Reservas sobre los espacios de un propietario; `None` devuelve todas
    pub async fn find_by_propietario(
        &self,
        propietario_id: Option<Uuid>,
    ) -> Result<Vec<Reserva>, AppError> {
        let reservas = sqlx::query_as::<_, Reserva>(&format!(
            "{} WHERE ($1::uuid IS NULL OR e.propietario_id = $1) ORDER BY r.fecha DESC, r.hora_inicio DESC",
            RESERVA_SELECT
        ))
        .bind(propietario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservas)
    }

    /// Hay otra reserva activa (pendiente o confirmada) que pisa la franja
    pub async fn existe_solape(
        &self,
        espacio_id: Uuid,
        fecha: NaiveDate,
        hora_inicio: NaiveTime,
        hora_fin: NaiveTime,
    ) -> Result<bool, AppError> {
        let (existe,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservas
                WHERE espacio_id = $1
                  AND fecha = $2
                  AND estado IN ($5, $6)
                  AND hora_inicio < $4
                  AND hora_fin > $3
            )
            "#,
        )
        .bind(espacio_id)
        .bind(fecha)
        .bind(hora_inicio)
        .bind(hora_fin)
        .bind(EstadoReserva::Pendiente.as_str())
        .bind(EstadoReserva::Confirmada.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(existe)
    }

    pub async fn create(&self, nueva: NuevaReserva<'_>) -> Result<Reserva, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>(&format!(
            r#"
            INSERT INTO reservas (usuario_id, espacio_id, fecha, hora_inicio, hora_fin, precio_total, estado, notas)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            RESERVA_COLUMNS
        ))
        .bind(nueva.usuario_id)
        .bind(nueva.espacio_id)
        .bind(nueva.fecha)
        .bind(nueva.hora_inicio)
        .bind(nueva.hora_fin)
        .bind(nueva.precio_total)
        .bind(EstadoReserva::Pendiente.as_str())
        .bind(nueva.notas)
        .fetch_one(&self.pool)
        .await?;

        log::info!("📅 Reserva {} creada para el espacio {}", reserva.id, reserva.espacio_id);
        Ok(reserva)
    }

    pub async fn cancelar(
        &self,
        id: Uuid,
        motivo: Option<&str>,
    ) -> Result<Option<Reserva>, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>(&format!(
            r#"
            UPDATE reservas
            SET estado = $2, motivo_cancelacion = $3, fecha_cancelacion = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RESERVA_COLUMNS
        ))
        .bind(id)
        .bind(EstadoReserva::Cancelada.as_str())
        .bind(motivo)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reserva)
    }
}
