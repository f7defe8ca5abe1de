use std::net::SocketAddr;

use tracing::{error, info};

use petfinder_api::{build_router, AppState};
use petfinder_infrastructure::Backends;
use petfinder_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    petfinder_shared::telemetry::init_telemetry();

    info!("PetFinder server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.auth.jwt_secret.is_empty() {
        error!("auth.jwt_secret must be set (AUTH__JWT_SECRET)");
        std::process::exit(1);
    }

    // Connect backends
    let backends = Backends::connect(&config).await?;

    // Build router
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let storage_root = backends.local_root.clone();
    let app = build_router(AppState::new(config, &backends), storage_root);

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("PetFinder server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
