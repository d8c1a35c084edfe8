use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use juegamas_backend::config::environment::EnvironmentConfig;
use juegamas_backend::database::DatabaseConnection;
use juegamas_backend::routes::create_app;
use juegamas_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("⚽ JuegaMás - API de reservas de espacios deportivos");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(pool, config);
    if !state.storage.is_configured() {
        info!("⚠️ STORAGE_URL no definido: la subida de imágenes devolverá error");
    }
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("🔑 Auth:");
    info!("   POST /api/auth/login | /api/auth/register | /api/auth/logout");
    info!("   GET  /api/auth/verify");
    info!("👤 Usuarios:");
    info!("   GET|PUT /api/usuarios/perfil  PUT /api/usuarios/password  POST /api/usuarios/foto");
    info!("🏟️ Espacios:");
    info!("   GET  /api/espacios  GET /api/espacios/:id");
    info!("   GET  /api/espacios/:id/estadisticas | ocupacion | tendencias");
    info!("   POST /api/espacios  POST /api/espacios/borrador/paso  POST /api/espacios/imagenes");
    info!("   PATCH /api/espacios/:id/estado");
    info!("🏠 Propietario:");
    info!("   GET  /api/propietario/espacios | resumen | reservas");
    info!("📅 Reservas:");
    info!("   GET|POST /api/reservas  PATCH /api/reservas/:id/cancelar");
    info!("✉️ Contacto e incidencias:");
    info!("   POST /api/contacto  GET|POST /api/incidencias");
    info!("🛡️ Admin:");
    info!("   GET  /api/admin/estadisticas | usuarios-recientes | contacto | incidencias");
    info!("   PATCH /api/admin/contacto/:id  PATCH /api/admin/incidencias/:id/estado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
