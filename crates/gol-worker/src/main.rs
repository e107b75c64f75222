//! Background worker binary for the Game of Life board service.
//!
//! Subscribes to board processing requests on NATS and runs each board to
//! completion against `PostgreSQL`. Requests that fail are logged and
//! dropped; there is no retry.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `gol-config.yaml` (or `GOL_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the snapshot database (connects and migrates)
//! 4. Join the NATS queue group
//! 5. Process requests until `Ctrl-C`, then wait for boards in flight

mod error;
mod nats;
mod worker;

use futures::StreamExt;
use gol_core::CancellationToken;
use gol_core::config::{GolConfig, LogFormat, LoggingConfig};
use gol_db::{PoolConfig, SnapshotDatabase};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::WorkerError;
use crate::nats::NatsClient;
use crate::worker::BoardWorker;

/// Application entry point for the board worker.
///
/// # Errors
///
/// Returns an error if configuration, the database, or NATS cannot be
/// initialized.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("gol-worker starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        max_concurrent_boards = config.worker.max_concurrent_boards,
        queue_group = config.worker.queue_group,
        "Configuration loaded"
    );

    // 3. Open the snapshot database.
    let db = SnapshotDatabase::open(&PoolConfig::from(&config.infrastructure))
        .await
        .map_err(WorkerError::from)?;

    // 4. Join the queue group.
    let nats = NatsClient::connect(&config.infrastructure.nats_url).await?;
    let subscriber = nats.subscribe_boards(&config.worker.queue_group).await?;

    // 5. Process until Ctrl-C.
    let worker = BoardWorker::new(
        db.store(),
        config.worker.max_concurrent_boards,
        CancellationToken::new(),
    );
    let messages = subscriber.map(|message| message.payload.to_vec());
    worker.run(messages, shutdown_signal()).await;

    db.close().await;
    info!("gol-worker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Load configuration, falling back to defaults when the file is missing.
///
/// Returns the configuration and whether it came from a file.
fn load_config() -> Result<(GolConfig, bool), WorkerError> {
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
