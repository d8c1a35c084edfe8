use crate::models::estadisticas::EstadisticasAdmin;
use crate::models::user::UserResponse;
use crate::repositories::estadisticas_repository::EstadisticasRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct AdminController {
    usuarios: UserRepository,
    estadisticas: EstadisticasRepository,
}

impl AdminController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            usuarios: UserRepository::new(pool.clone()),
            estadisticas: EstadisticasRepository::new(pool),
        }
    }

    pub async fn estadisticas(&self) -> EstadisticasAdmin {
        self.estadisticas.estadisticas_admin().await
    }

    pub async fn usuarios_recientes(&self, limite: i64) -> Result<Vec<UserResponse>, AppError> {
        let usuarios = self.usuarios.find_recent(limite).await?;
        Ok(usuarios.into_iter().map(UserResponse::from).collect())
    }
}
