use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use dealership_catalog::cache::{CacheConfig, CacheOperations, RedisClient};
use dealership_catalog::config::{DatabaseConfig, EnvironmentConfig};
use dealership_catalog::database::DatabaseConnection;
use dealership_catalog::routes::create_app;
use dealership_catalog::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚗 Dealership Catalog API ({})", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::connect(&DatabaseConfig::from_env()?).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    db_connection.run_migrations().await?;

    // Redis es opcional: sin él el conteo total no se cachea
    let cache: Option<Arc<dyn CacheOperations>> = match &config.redis_url {
        Some(redis_url) => {
            let redis_config = CacheConfig {
                redis_url: redis_url.clone(),
                default_ttl: config.total_count_ttl,
                ..CacheConfig::default()
            };
            match RedisClient::new(redis_config).await {
                Ok(client) => Some(Arc::new(client) as Arc<dyn CacheOperations>),
                Err(e) => {
                    warn!("⚠️ Redis no disponible, se continúa sin cache: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    let app_state = AppState::postgres(db_connection.pool().clone(), config.clone(), cache);
    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health");
    info!("   GET    /api/vehicles - Catálogo (filtros, orden, paginación)");
    info!("   POST   /api/vehicles/facets - Conteo de facetas");
    info!("   GET    /api/vehicles/:id - Obtener vehículo");
    info!("   POST   /api/vehicles - Crear vehículo (staff)");
    info!("   PUT    /api/vehicles/:id - Actualizar vehículo (staff)");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo (staff)");
    info!("   POST   /api/inquiries - Enviar consulta");
    info!("   GET    /api/inquiries - Listar consultas (staff)");
    info!("   GET    /api/working-hours - Horario");
    info!("   PUT    /api/working-hours - Reemplazar horario (admin)");
    info!("   GET    /api/admin/me - Perfil (staff)");

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
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
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
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
