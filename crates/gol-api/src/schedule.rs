//! Hand-off of boards to background workers over NATS.

use gol_types::{BOARD_PROCESSING_SUBJECT, BoardId, ScheduleBoardMessage};
use tracing::{debug, info};

/// Errors raised while scheduling a board.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Could not connect to the NATS server.
    #[error("NATS connect error: {0}")]
    Connect(String),

    /// The message could not be encoded.
    #[error("message encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The message could not be published.
    #[error("NATS publish error: {0}")]
    Publish(String),
}

/// Publishes [`ScheduleBoardMessage`]s for workers to pick up.
#[derive(Debug, Clone)]
pub struct BoardScheduler {
    client: async_nats::Client,
}

impl BoardScheduler {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Connect`] if the connection cannot be
    /// established.
    pub async fn connect(url: &str) -> Result<Self, ScheduleError> {
        info!(url = url, "connecting to NATS server");
        let client = async_nats::connect(url)
            .await
            .map_err(|e| ScheduleError::Connect(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub const fn new(client: async_nats::Client) -> Self {
        Self { client }
    }

    /// Publish a processing request for a board and flush it to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if encoding, publishing or flushing fails.
    pub async fn schedule(&self, board_id: BoardId) -> Result<(), ScheduleError> {
        let payload = ScheduleBoardMessage { board_id }.to_payload()?;
        debug!(subject = BOARD_PROCESSING_SUBJECT, %board_id, "publishing board");

        self.client
            .publish(BOARD_PROCESSING_SUBJECT, payload.into())
            .await
            .map_err(|e| {
                ScheduleError::Publish(format!("failed to publish to {BOARD_PROCESSING_SUBJECT}: {e}"))
            })?;
        self.client
            .flush()
            .await
            .map_err(|e| ScheduleError::Publish(format!("failed to flush: {e}")))?;
        Ok(())
    }
}
