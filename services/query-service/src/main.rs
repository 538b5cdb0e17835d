use anyhow::Result;
use common::config::AppConfig;
use common::telemetry::{init_telemetry, shutdown_telemetry, TelemetryConfig};
use std::net::SocketAddr;

mod handlers;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    init_telemetry(TelemetryConfig::for_service("query-service", &config))
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("Starting Query Service...");
    tracing::info!(
        "Distributed tracing: {}",
        if config.enable_jaeger { "enabled" } else { "disabled" }
    );

    tracing::info!("Configuration:");
    tracing::info!("  Database: {}:{}/{}", config.database.host, config.database.port, config.database.database);
    tracing::info!("  Cache enabled: {}", config.cache.enabled);
    tracing::info!("  Cache TTL: {} seconds", config.cache.ttl_seconds);
    tracing::info!("  Request timeout: {} ms", config.server.request_timeout_ms);
    tracing::info!("  Port: {}", config.server.port);

    // Initialize application state
    let state = AppState::new(&config).await?;

    // Build router
    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Query service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    // Shutdown telemetry gracefully
    shutdown_telemetry();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
