use crate::dto::espacio_dto::{CaracteristicaInput, EspacioFilters, HorarioInput, ImagenInput};
use crate::models::espacio::{
    Caracteristica, Espacio, EstadoEspacio, HorarioEspacio, ImagenEspacio,
};
use crate::services::espacio_service::EspacioWriter;
use crate::services::wizard::NuevoEspacio;
use crate::utils::errors::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const ESPACIO_COLUMNS: &str = "id, propietario_id, nombre, descripcion, tipo, direccion, ciudad, \
                               region, latitud::float8 AS latitud, longitud::float8 AS longitud, \
                               precio_hora, capacidad, estado_espacio, created_at, updated_at";

const ESPACIO_SELECT: &str = r#"
    SELECT e.id, e.propietario_id, e.nombre, e.descripcion, e.tipo, e.direccion, e.ciudad,
           e.region, e.latitud::float8 AS latitud, e.longitud::float8 AS longitud,
           e.precio_hora, e.capacidad, e.estado_espacio, e.created_at, e.updated_at,
           (SELECT i.url FROM imagenes_espacio i
             WHERE i.espacio_id = e.id
             ORDER BY i.es_principal DESC, i.orden ASC
             LIMIT 1) AS imagen_principal
    FROM espacios_deportivos e
"#;

/// Patrón `%texto%` para ILIKE con los comodines del usuario escapados
fn patron_ilike(texto: &str) -> String {
    let mut patron = String::with_capacity(texto.len() + 2);
    patron.push('%');
    for c in texto.chars() {
        if matches!(c, '\\' | '%' | '_') {
            patron.push('\\');
        }
        patron.push(c);
    }
    patron.push('%');
    patron
}

fn push_ilike(builder: &mut QueryBuilder<'_, Postgres>, columna: &str, patron: &str) {
    builder.push(columna);
    builder.push(" ILIKE ");
    builder.push_bind(patron.to_string());
    builder.push(" ESCAPE '\\'");
}

/// Condiciones del listado público; siempre restringe a espacios activos
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &EspacioFilters) {
    builder.push(" WHERE e.estado_espacio = ");
    builder.push_bind(EstadoEspacio::Activo.as_str());

    if let Some(busqueda) = &filters.busqueda {
        let patron = patron_ilike(busqueda);
        builder.push(" AND (");
        push_ilike(builder, "e.nombre", &patron);
        builder.push(" OR ");
        push_ilike(builder, "e.descripcion", &patron);
        builder.push(" OR ");
        push_ilike(builder, "e.direccion", &patron);
        builder.push(" OR ");
        push_ilike(builder, "e.ciudad", &patron);
        builder.push(")");
    }
    if let Some(tipo) = &filters.tipo {
        builder.push(" AND e.tipo = ");
        builder.push_bind(tipo.clone());
    }
    if let Some(ciudad) = &filters.ciudad {
        builder.push(" AND ");
        push_ilike(builder, "e.ciudad", &patron_ilike(ciudad));
    }
    if let Some(min) = filters.precio_min {
        builder.push(" AND e.precio_hora >= ");
        builder.push_bind(min);
    }
    if let Some(max) = filters.precio_max {
        builder.push(" AND e.precio_hora <= ");
        builder.push_bind(max);
    }
    if let Some(capacidad) = filters.capacidad_min {
        builder.push(" AND e.capacidad >= ");
        builder.push_bind(capacidad);
    }
}

pub(crate) fn build_list_query(filters: &EspacioFilters) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(ESPACIO_SELECT);
    push_filters(&mut builder, filters);
    builder.push(" ORDER BY ");
    builder.push(filters.orden.order_clause());
    builder.push(" LIMIT ");
    builder.push_bind(filters.per_page);
    builder.push(" OFFSET ");
    builder.push_bind(filters.offset());
    builder
}

pub(crate) fn build_count_query(filters: &EspacioFilters) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM espacios_deportivos e");
    push_filters(&mut builder, filters);
    builder
}

pub struct EspacioRepository {
    pool: PgPool,
}

impl EspacioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado paginado de espacios activos; devuelve también el total sin paginar
    pub async fn list(&self, filters: &EspacioFilters) -> Result<(Vec<Espacio>, i64), AppError> {
        let mut list_query = build_list_query(filters);
        let espacios = list_query
            .build_query_as::<Espacio>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query = build_count_query(filters);
        let (total,): (i64,) = count_query
            .build_query_as()
            .fetch_one(&self.pool)
            .await?;

        log::debug!("🔎 Listado de espacios: {} de {}", espacios.len(), total);
        Ok((espacios, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Espacio>, AppError> {
        let espacio = sqlx::query_as::<_, Espacio>(&format!("{} WHERE e.id = $1", ESPACIO_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(espacio)
    }

    pub async fn find_caracteristicas(&self, espacio_id: Uuid) -> Result<Vec<Caracteristica>, AppError> {
        let filas = sqlx::query_as::<_, Caracteristica>(
            "SELECT id, espacio_id, nombre, descripcion FROM caracteristicas_espacio WHERE espacio_id = $1 ORDER BY nombre",
        )
        .bind(espacio_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    pub async fn find_imagenes(&self, espacio_id: Uuid) -> Result<Vec<ImagenEspacio>, AppError> {
        let filas = sqlx::query_as::<_, ImagenEspacio>(
            "SELECT id, espacio_id, url, es_principal, orden FROM imagenes_espacio WHERE espacio_id = $1 ORDER BY orden",
        )
        .bind(espacio_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    pub async fn find_horarios(&self, espacio_id: Uuid) -> Result<Vec<HorarioEspacio>, AppError> {
        let filas = sqlx::query_as::<_, HorarioEspacio>(
            r#"
            SELECT id, espacio_id, dia_semana, hora_inicio, hora_fin, disponible
            FROM horarios_espacio
            WHERE espacio_id = $1
            ORDER BY dia_semana, hora_inicio
            "#,
        )
        .bind(espacio_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    /// Espacios de un propietario; `None` lista todos (vista de administrador)
    pub async fn find_by_propietario(
        &self,
        propietario_id: Option<Uuid>,
    ) -> Result<Vec<Espacio>, AppError> {
        let espacios = sqlx::query_as::<_, Espacio>(&format!(
            "{} WHERE ($1::uuid IS NULL OR e.propietario_id = $1) ORDER BY e.created_at DESC",
            ESPACIO_SELECT
        ))
        .bind(propietario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(espacios)
    }

    pub async fn update_estado(
        &self,
        id: Uuid,
        estado: EstadoEspacio,
    ) -> Result<Option<Espacio>, AppError> {
        let espacio = sqlx::query_as::<_, Espacio>(&format!(
            r#"
            UPDATE espacios_deportivos
            SET estado_espacio = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ESPACIO_COLUMNS
        ))
        .bind(id)
        .bind(estado.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if espacio.is_some() {
            log::info!("🔄 Espacio {} pasa a estado {}", id, estado);
        }
        Ok(espacio)
    }
}

#[async_trait]
impl EspacioWriter for EspacioRepository {
    async fn insertar_espacio(
        &self,
        propietario_id: Uuid,
        nuevo: &NuevoEspacio,
    ) -> Result<Espacio, AppError> {
        let espacio = sqlx::query_as::<_, Espacio>(&format!(
            r#"
            INSERT INTO espacios_deportivos (
                propietario_id, nombre, descripcion, tipo, direccion, ciudad, region,
                latitud, longitud, precio_hora, capacidad, estado_espacio
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            ESPACIO_COLUMNS
        ))
        .bind(propietario_id)
        .bind(&nuevo.nombre)
        .bind(&nuevo.descripcion)
        .bind(&nuevo.tipo)
        .bind(&nuevo.direccion)
        .bind(&nuevo.ciudad)
        .bind(&nuevo.region)
        .bind(nuevo.latitud)
        .bind(nuevo.longitud)
        .bind(nuevo.precio_hora)
        .bind(nuevo.capacidad)
        .bind(EstadoEspacio::Pendiente.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(espacio)
    }

    async fn insertar_caracteristica(
        &self,
        espacio_id: Uuid,
        caracteristica: &CaracteristicaInput,
    ) -> Result<Caracteristica, AppError> {
        let fila = sqlx::query_as::<_, Caracteristica>(
            r#"
            INSERT INTO caracteristicas_espacio (espacio_id, nombre, descripcion)
            VALUES ($1, $2, $3)
            RETURNING id, espacio_id, nombre, descripcion
            "#,
        )
        .bind(espacio_id)
        .bind(caracteristica.nombre.trim())
        .bind(&caracteristica.descripcion)
        .fetch_one(&self.pool)
        .await?;

        Ok(fila)
    }

    async fn insertar_imagen(
        &self,
        espacio_id: Uuid,
        imagen: &ImagenInput,
        orden: i32,
    ) -> Result<ImagenEspacio, AppError> {
        let fila = sqlx::query_as::<_, ImagenEspacio>(
            r#"
            INSERT INTO imagenes_espacio (espacio_id, url, es_principal, orden)
            VALUES ($1, $2, $3, $4)
            RETURNING id, espacio_id, url, es_principal, orden
            "#,
        )
        .bind(espacio_id)
        .bind(&imagen.url)
        .bind(imagen.es_principal)
        .bind(orden)
        .fetch_one(&self.pool)
        .await?;

        Ok(fila)
    }

    async fn insertar_horario(
        &self,
        espacio_id: Uuid,
        horario: &HorarioInput,
    ) -> Result<HorarioEspacio, AppError> {
        let fila = sqlx::query_as::<_, HorarioEspacio>(
            r#"
            INSERT INTO horarios_espacio (espacio_id, dia_semana, hora_inicio, hora_fin, disponible)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, espacio_id, dia_semana, hora_inicio, hora_fin, disponible
            "#,
        )
        .bind(espacio_id)
        .bind(horario.dia_semana)
        .bind(horario.hora_inicio)
        .bind(horario.hora_fin)
        .fetch_one(&self.pool)
        .await?;

        Ok(fila)
    }
}
