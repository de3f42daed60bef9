//! hawaii-climate - a read-only HTTP API over the Hawaii climate dataset
//!
//! This is the main entry point for the hawaii-climate application.

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use hawaii_climate::handlers::heartbeat::mark_started;
use hawaii_climate::{build_router, init_tracing, log_dataset_stats, log_error};
use hawaii_climate::{AppState, ClimateError, Config, Result};

fn main() -> Result<()> {
    mark_started();

    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);
    info!("Starting hawaii-climate v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = config.server.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.build()?;

    runtime.block_on(serve(config)).map_err(|e| {
        log_error(&e, "server");
        e
    })
}

async fn serve(config: Config) -> Result<()> {
    info!("Opening database: {:?}", config.database.path);

    // A missing or malformed store is fatal
    let state = AppState::open(config.clone()).await?;

    let summary = state.store.dataset_summary().await?;
    log_dataset_stats(&state.store.path().display().to_string(), &summary);

    let app = build_router(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| ClimateError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ClimateError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ClimateError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
