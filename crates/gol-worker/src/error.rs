//! Error types for the board worker.

/// Errors that can occur during worker operation.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: gol_core::config::ConfigError,
    },

    /// Database connection or migration failed.
    #[error("database error: {source}")]
    Database {
        /// The underlying database error.
        #[from]
        source: gol_db::DbError,
    },

    /// Failed to connect to or communicate with the NATS server.
    #[error("NATS error: {0}")]
    Nats(String),

    /// A queue message could not be decoded.
    #[error("message decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Running the board failed.
    #[error("processing error: {0}")]
    Process(#[from] gol_core::ProcessError),
}
