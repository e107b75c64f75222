//! Queue messages exchanged between the API and the background worker.
//!
//! The API publishes a [`ScheduleBoardMessage`] on
//! [`BOARD_PROCESSING_SUBJECT`]; workers queue-subscribe to that subject so
//! each message is handled by exactly one of them.

use serde::{Deserialize, Serialize};

use crate::ids::BoardId;

/// NATS subject carrying board processing requests.
pub const BOARD_PROCESSING_SUBJECT: &str = "gol.boards.process";

/// Request to run a board until it reaches a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBoardMessage {
    /// The board to process.
    pub board_id: BoardId,
}

impl ScheduleBoardMessage {
    /// Encode as a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if encoding fails.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid message.
    pub fn from_payload(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_a_flat_json_object() {
        let msg = ScheduleBoardMessage {
            board_id: BoardId::new(),
        };
        let payload = msg.to_payload().unwrap_or_default();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap_or_default();
        assert_eq!(value["board_id"], msg.board_id.to_string());
        assert_eq!(ScheduleBoardMessage::from_payload(&payload).ok(), Some(msg));
    }

    #[test]
    fn garbage_payload_is_rejected() {
        assert!(ScheduleBoardMessage::from_payload(b"{\"board\":1}").is_err());
    }
}
