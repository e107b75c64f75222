//! HTTP API for creating and advancing Game of Life boards.
//!
//! This crate provides an Axum router over any
//! [`SnapshotStore`](gol_core::SnapshotStore), input validation, the
//! mapping from domain errors to HTTP responses, and the NATS publisher
//! used to hand boards to background workers.

pub mod error;
pub mod handlers;
pub mod router;
pub mod schedule;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use schedule::{BoardScheduler, ScheduleError};
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
