use axum::Router;
use std::net::SocketAddr;
use tracing::{error, info};

use pomodoro_api::{build_router, AppState};
use pomodoro_core::TimerService;
use pomodoro_infrastructure::{build_store, schema};
use pomodoro_shared::config::AppConfig;
use pomodoro_shared::constants::SESSIONS_COLLECTION;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize telemetry
    let _log_guard = pomodoro_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Store and schema
    let store = build_store(&config.store);
    if let Err(e) = schema::initialize(store.as_ref()).await {
        error!("Failed to initialize store: {}", e);
        return Err(e.into());
    }

    if config.store.reset_sessions_on_startup {
        let removed = schema::reset_collection(store.as_ref(), SESSIONS_COLLECTION).await?;
        schema::initialize(store.as_ref()).await?;
        info!("Sessions reset on startup ({} removed)", removed);
    }

    // Build router
    let app: Router = build_router(AppState::new(TimerService::new(store)));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
