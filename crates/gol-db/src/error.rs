//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors. At the [`SnapshotStore`] boundary they are converted to
//! [`StoreError`].
//!
//! [`SnapshotStore`]: gol_core::SnapshotStore

use gol_core::StoreError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row holds a value the domain cannot represent.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// An iteration number does not fit the `BIGINT` column.
    #[error("Iteration {0} exceeds the storable range")]
    IterationOutOfRange(u64),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Serialization(source) => Self::Codec(source),
            other => Self::Backend(other.to_string()),
        }
    }
}
