//! Census - Countries & People Service
//!
//! HTTP entry point: reads configuration, prepares the database and serves
//! the API until interrupted.

use anyhow::{Context, Result};
use census_api::{config::ServerConfig, create_router, telemetry, AppState};
use census_postgres::{ensure_schema, PgRepository};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    telemetry::init(config.log_format);

    info!("Starting Census service");

    let repository = PgRepository::connect(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    ensure_schema(repository.pool())
        .await
        .context("failed to prepare database schema")?;

    let state = AppState::new(repository);
    let app = create_router(state);

    let addr = config.bind_addr();
    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Census service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
