use anyhow::{Context, Result};
use std::net::SocketAddr;

use api::{create_router, AppState};
use common::bootstrap::init_storage;
use common::config::Settings;
use common::service::EventService;
use common::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Settings::load().context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    telemetry::init_logging(&config.observability)?;
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        backend = ?config.storage.backend,
        "Configuration loaded"
    );

    let storage = init_storage(&config).await?;
    let events = EventService::new(storage.repository);

    let mut state = AppState::new(events, config.clone());
    if config.observability.metrics_enabled {
        state = state.with_metrics(telemetry::init_metrics()?);
    }

    let app = create_router(state);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .context("Invalid server host")?,
        config.server.port,
    ));
    tracing::info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = storage.pool {
        pool.close().await;
    }
    if config.observability.tracing_endpoint.is_some() {
        telemetry::shutdown_tracer();
    }

    tracing::info!("API server stopped");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Initiating graceful shutdown");
}
