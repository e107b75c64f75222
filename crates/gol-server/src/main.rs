//! HTTP server binary for the Game of Life board service.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `gol-config.yaml` (or `GOL_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the snapshot database (connects and migrates)
//! 4. Connect to NATS for background scheduling (optional)
//! 5. Serve the board API until `Ctrl-C`

mod error;

use std::sync::Arc;

use gol_api::{AppState, BoardScheduler, ServerConfig};
use gol_core::config::{GolConfig, LogFormat, LoggingConfig};
use gol_db::{PoolConfig, SnapshotDatabase};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Application entry point for the board API server.
///
/// # Errors
///
/// Returns an error if configuration, the database, or the HTTP listener
/// cannot be initialized.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("gol-server starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        max_iterations = config.board.max_iterations,
        final_state_default_attempts = config.board.final_state_default_attempts,
        http_port = config.infrastructure.http_port,
        "Configuration loaded"
    );

    // 3. Open the snapshot database.
    let db = SnapshotDatabase::open(&PoolConfig::from(&config.infrastructure))
        .await
        .map_err(ServerError::from)?;
    let mut state = AppState::new(db.store(), config.board.clone());

    // 4. Connect to NATS. The API still serves synchronous requests without it.
    match BoardScheduler::connect(&config.infrastructure.nats_url).await {
        Ok(scheduler) => state = state.with_scheduler(scheduler),
        Err(e) => warn!(error = %e, "Background scheduling disabled"),
    }

    // 5. Serve until Ctrl-C.
    let server_config = ServerConfig::from(&config.infrastructure);
    gol_api::start_server(&server_config, Arc::new(state))
        .await
        .map_err(ServerError::from)?;

    db.close().await;
    info!("gol-server stopped");
    Ok(())
}

/// Load configuration, falling back to defaults when the file is missing.
///
/// Returns the configuration and whether it came from a file.
fn load_config() -> Result<(GolConfig, bool), ServerError> {
    let path = GolConfig::path();
    if path.exists() {
        Ok((GolConfig::from_file(&path)?, true))
    } else {
        Ok((GolConfig::from_env(), false))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
