//! `PostgreSQL` persistence for Game of Life board generations.
//!
//! # Modules
//!
//! - [`database`] -- Migrated connection pool built from the config file
//! - [`board_store`] -- [`PgSnapshotStore`], the `PostgreSQL` snapshot store
//! - [`error`] -- Shared error types

pub mod board_store;
pub mod database;
pub mod error;

// Re-export primary types for convenience.
pub use board_store::{BoardSnapshotRow, PgSnapshotStore};
pub use database::{PoolConfig, SnapshotDatabase};
pub use error::DbError;
