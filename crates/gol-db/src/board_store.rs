//! `PostgreSQL` implementation of [`SnapshotStore`].
//!
//! Generations live in the `board_snapshots` table, one row per
//! `(board_id, iteration)`. Live cells are stored as compact JSON text and
//! fingerprints as the `BIGINT` with the same bit pattern.

use chrono::{DateTime, Utc};
use gol_core::{BoardSnapshot, SnapshotStore, StoreError};
use gol_types::{BoardId, BoardStatus, Fingerprint, LiveCells, SnapshotId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

const SELECT_HISTORY: &str = r"
    SELECT id, board_id, iteration, live_cells, fingerprint, status, created_at
    FROM board_snapshots
    WHERE board_id = $1
    ORDER BY iteration";

const SELECT_LATEST: &str = r"
    SELECT id, board_id, iteration, live_cells, fingerprint, status, created_at
    FROM board_snapshots
    WHERE board_id = $1
    ORDER BY iteration DESC
    LIMIT 1";

const SELECT_LATEST_BY_FINGERPRINT: &str = r"
    SELECT id, board_id, iteration, live_cells, fingerprint, status, created_at
    FROM board_snapshots
    WHERE board_id = $1 AND fingerprint = $2
    ORDER BY iteration DESC
    LIMIT 1";

/// Snapshot store session over a `PostgreSQL` pool.
///
/// Staged generations are held in memory and written in a single
/// transaction on commit. The unique `(board_id, iteration)` constraint is
/// what rejects a duplicate generation written by another session.
#[derive(Debug)]
pub struct PgSnapshotStore {
    pool: PgPool,
    staged: Vec<BoardSnapshot>,
}

impl PgSnapshotStore {
    /// Create a store session bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool,
            staged: Vec::new(),
        }
    }

    /// Every stored generation of a board, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails or a row cannot be decoded.
    pub async fn board_history(&self, board_id: BoardId) -> Result<Vec<BoardSnapshot>, DbError> {
        let rows = sqlx::query_as::<_, BoardSnapshotRow>(SELECT_HISTORY)
            .bind(board_id.into_inner())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(BoardSnapshotRow::into_snapshot).collect()
    }

    async fn fetch_latest(
        &self,
        board_id: BoardId,
        fingerprint: Option<Fingerprint>,
    ) -> Result<Option<BoardSnapshot>, DbError> {
        let row = match fingerprint {
            None => {
                sqlx::query_as::<_, BoardSnapshotRow>(SELECT_LATEST)
                    .bind(board_id.into_inner())
                    .fetch_optional(&self.pool)
                    .await?
            }
            Some(fp) => {
                sqlx::query_as::<_, BoardSnapshotRow>(SELECT_LATEST_BY_FINGERPRINT)
                    .bind(board_id.into_inner())
                    .bind(fp.to_storage())
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        row.map(BoardSnapshotRow::into_snapshot).transpose()
    }

    async fn write_staged(&self, staged: &[BoardSnapshot]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        for snapshot in staged {
            let iteration = storage_iteration(snapshot.iteration)?;
            let live_cells = snapshot.live_cells.to_compact_json()?;

            let result = sqlx::query(
                r"INSERT INTO board_snapshots
                  (id, board_id, iteration, live_cells, fingerprint, status)
                  VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(snapshot.id.into_inner())
            .bind(snapshot.board_id.into_inner())
            .bind(iteration)
            .bind(live_cells)
            .bind(snapshot.fingerprint.to_storage())
            .bind(snapshot.status.code())
            .execute(&mut *tx)
            .await;

            match result {
                Ok(_) => {}
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    return Err(StoreError::Duplicate {
                        board_id: snapshot.board_id,
                        iteration: snapshot.iteration,
                    });
                }
                Err(err) => return Err(DbError::from(err).into()),
            }
        }

        tx.commit().await.map_err(DbError::from)?;
        Ok(())
    }
}

impl Clone for PgSnapshotStore {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl SnapshotStore for PgSnapshotStore {
    async fn add(&mut self, snapshot: BoardSnapshot) -> Result<(), StoreError> {
        if self
            .staged
            .iter()
            .any(|s| s.board_id == snapshot.board_id && s.iteration == snapshot.iteration)
        {
            return Err(StoreError::Duplicate {
                board_id: snapshot.board_id,
                iteration: snapshot.iteration,
            });
        }
        self.staged.push(snapshot);
        Ok(())
    }

    async fn latest_by_board(&self, board_id: BoardId) -> Result<Option<BoardSnapshot>, StoreError> {
        self.fetch_latest(board_id, None)
            .await
            .map_err(StoreError::from)
    }

    async fn latest_by_board_and_fingerprint(
        &self,
        board_id: BoardId,
        fingerprint: Fingerprint,
    ) -> Result<Option<BoardSnapshot>, StoreError> {
        self.fetch_latest(board_id, Some(fingerprint))
            .await
            .map_err(StoreError::from)
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(());
        }

        self.write_staged(&staged).await?;
        tracing::debug!(count = staged.len(), "Committed board snapshots");
        Ok(())
    }
}

/// A row from the `board_snapshots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoardSnapshotRow {
    /// Row identifier.
    pub id: Uuid,
    /// Board identifier.
    pub board_id: Uuid,
    /// Generation number.
    pub iteration: i64,
    /// Live cells as compact JSON.
    pub live_cells: String,
    /// Fingerprint bits.
    pub fingerprint: i64,
    /// Persisted status code.
    pub status: i16,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
}

impl BoardSnapshotRow {
    /// Decode into a domain snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CorruptRow`] for a negative iteration or an unknown
    /// status code, and [`DbError::Serialization`] for malformed live cells.
    pub fn into_snapshot(self) -> Result<BoardSnapshot, DbError> {
        let iteration = u64::try_from(self.iteration)
            .map_err(|err| DbError::CorruptRow(format!("iteration {}: {err}", self.iteration)))?;
        let status = BoardStatus::from_code(self.status)
            .ok_or_else(|| DbError::CorruptRow(format!("unknown status code {}", self.status)))?;

        Ok(BoardSnapshot {
            id: SnapshotId::from(self.id),
            board_id: BoardId::from(self.board_id),
            iteration,
            live_cells: LiveCells::from_compact_json(&self.live_cells)?,
            fingerprint: Fingerprint::from_storage(self.fingerprint),
            status,
        })
    }
}

/// Convert an iteration number for the `BIGINT` column.
fn storage_iteration(iteration: u64) -> Result<i64, DbError> {
    i64::try_from(iteration)
        .ok()
        .ok_or(DbError::IterationOutOfRange(iteration))
}
