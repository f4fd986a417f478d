use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_charger::config::environment::EnvironmentConfig;
use fleet_charger::routes::create_app_router;
use fleet_charger::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG tiene prioridad)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🔌 Fleet Charger - Kiosco de carga y mantenimiento");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(e.into());
        }
    };
    info!("⚙️ Entorno: {}", config.environment);

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::from_config(config)?;
    let app = create_app_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔌 Endpoints - Kiosco de carga:");
    info!("   GET  /api/charger/session - Estado de la sesión");
    info!("   POST /api/charger/scanner/open - Abrir escáner");
    info!("   POST /api/charger/scanner/close - Cerrar escáner");
    info!("   POST /api/charger/scan - QR decodificado");
    info!("   POST /api/charger/reject - Rechazar matrícula");
    info!("   POST /api/charger/confirm - Confirmar matrícula");
    info!("   POST /api/charger/reset - Reiniciar sesión");
    info!("   POST /api/charger/dispenser - Abrir dispensador");
    info!("   POST /api/charger/note - Agregar nota");
    info!("🚗 Endpoints - Vehículos:");
    info!("   GET  /api/vehicles - Tabla de mantenimiento");
    info!("   POST /api/vehicles - Registrar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo instalar el handler de SIGTERM: {}", e);
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
