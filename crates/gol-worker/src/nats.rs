//! NATS queue subscription for board processing requests.
//!
//! Workers join a queue group on [`BOARD_PROCESSING_SUBJECT`], so each
//! published request is delivered to exactly one of them.

use gol_types::BOARD_PROCESSING_SUBJECT;
use tracing::{debug, info};

use crate::error::WorkerError;

/// NATS client wrapper for the worker.
pub struct NatsClient {
    client: async_nats::Client,
}

impl NatsClient {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Nats`] if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, WorkerError> {
        info!(url = url, "connecting to NATS server");
        let client = async_nats::connect(url)
            .await
            .map_err(|e| WorkerError::Nats(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// Join the board processing queue group.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Nats`] if the subscription fails.
    pub async fn subscribe_boards(
        &self,
        queue_group: &str,
    ) -> Result<async_nats::Subscriber, WorkerError> {
        debug!(
            subject = BOARD_PROCESSING_SUBJECT,
            queue_group, "subscribing to board requests"
        );
        let subscriber = self
            .client
            .queue_subscribe(BOARD_PROCESSING_SUBJECT, queue_group.to_owned())
            .await
            .map_err(|e| {
                WorkerError::Nats(format!(
                    "failed to subscribe to {BOARD_PROCESSING_SUBJECT}: {e}"
                ))
            })?;
        info!(queue_group, "subscribed to board requests");
        Ok(subscriber)
    }
}
