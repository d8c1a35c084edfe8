//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todo es barato de clonar; el cliente HTTP
//! vive dentro de `storage`.

use reqwest::Client;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::services::storage_service::StorageClient;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub storage: StorageClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️ Cliente HTTP con configuración por defecto: {}", e);
                Client::new()
            });

        Self {
            jwt: JwtConfig::from(&config),
            storage: StorageClient::from_config(http_client, &config),
            pool,
            config,
        }
    }
}
