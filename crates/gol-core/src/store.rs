//! Persistence seam for board generations.
//!
//! The controller only talks to storage through [`SnapshotStore`]. Writes
//! are staged with [`SnapshotStore::add`] and become visible to queries once
//! [`SnapshotStore::commit`] succeeds. Each clone of a store is an
//! independent session over the same backend: it sees every committed row
//! but starts with nothing staged.
//!
//! [`InMemorySnapshotStore`] backs unit and API tests. The `PostgreSQL`
//! implementation lives in `gol-db`.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use gol_types::{BoardId, Fingerprint};
use tokio::sync::RwLock;

use crate::snapshot::BoardSnapshot;

/// Errors raised by a snapshot store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A generation with this board and iteration already exists.
    #[error("snapshot for board {board_id} at iteration {iteration} already exists")]
    Duplicate {
        /// The board.
        board_id: BoardId,
        /// The conflicting iteration.
        iteration: u64,
    },

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A live-cell payload could not be encoded or decoded.
    #[error("live-cell codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Storage for board generations.
///
/// Queries only see committed rows. Implementations must reject a second
/// generation for the same `(board_id, iteration)` pair with
/// [`StoreError::Duplicate`], either at `add` or at `commit`.
pub trait SnapshotStore: Clone + Send + Sync + 'static {
    /// Stage a generation for the next commit.
    fn add(
        &mut self,
        snapshot: BoardSnapshot,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The highest-iteration generation of a board.
    fn latest_by_board(
        &self,
        board_id: BoardId,
    ) -> impl Future<Output = Result<Option<BoardSnapshot>, StoreError>> + Send;

    /// The highest-iteration generation of a board with the given
    /// fingerprint.
    fn latest_by_board_and_fingerprint(
        &self,
        board_id: BoardId,
        fingerprint: Fingerprint,
    ) -> impl Future<Output = Result<Option<BoardSnapshot>, StoreError>> + Send;

    /// Persist every staged generation atomically.
    ///
    /// Staged rows are discarded whether or not the commit succeeds.
    fn commit(&mut self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

type BoardHistories = BTreeMap<BoardId, Vec<BoardSnapshot>>;

/// Process-local [`SnapshotStore`].
///
/// Committed generations are kept per board in iteration order behind a
/// shared lock, so clones handed to concurrent tasks observe each other's
/// commits.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    committed: Arc<RwLock<BoardHistories>>,
    staged: Vec<BoardSnapshot>,
}

impl InMemorySnapshotStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every committed generation of a board, oldest first.
    pub async fn history(&self, board_id: BoardId) -> Vec<BoardSnapshot> {
        self.committed
            .read()
            .await
            .get(&board_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of generations waiting for [`SnapshotStore::commit`].
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }
}

impl Clone for InMemorySnapshotStore {
    fn clone(&self) -> Self {
        Self {
            committed: Arc::clone(&self.committed),
            staged: Vec::new(),
        }
    }
}

fn has_iteration(rows: &[BoardSnapshot], iteration: u64) -> bool {
    rows.binary_search_by_key(&iteration, |s| s.iteration).is_ok()
}

impl SnapshotStore for InMemorySnapshotStore {
    async fn add(&mut self, snapshot: BoardSnapshot) -> Result<(), StoreError> {
        let staged_clash = self
            .staged
            .iter()
            .any(|s| s.board_id == snapshot.board_id && s.iteration == snapshot.iteration);
        let committed_clash = self
            .committed
            .read()
            .await
            .get(&snapshot.board_id)
            .is_some_and(|rows| has_iteration(rows, snapshot.iteration));

        if staged_clash || committed_clash {
            return Err(StoreError::Duplicate {
                board_id: snapshot.board_id,
                iteration: snapshot.iteration,
            });
        }

        self.staged.push(snapshot);
        Ok(())
    }

    async fn latest_by_board(&self, board_id: BoardId) -> Result<Option<BoardSnapshot>, StoreError> {
        Ok(self
            .committed
            .read()
            .await
            .get(&board_id)
            .and_then(|rows| rows.last())
            .cloned())
    }

    async fn latest_by_board_and_fingerprint(
        &self,
        board_id: BoardId,
        fingerprint: Fingerprint,
    ) -> Result<Option<BoardSnapshot>, StoreError> {
        Ok(self
            .committed
            .read()
            .await
            .get(&board_id)
            .and_then(|rows| rows.iter().rev().find(|s| s.fingerprint == fingerprint))
            .cloned())
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(());
        }

        let mut committed = self.committed.write().await;

        // Another session may have committed the same iteration since `add`.
        if let Some(clash) = staged.iter().find(|s| {
            committed
                .get(&s.board_id)
                .is_some_and(|rows| has_iteration(rows, s.iteration))
        }) {
            return Err(StoreError::Duplicate {
                board_id: clash.board_id,
                iteration: clash.iteration,
            });
        }

        for snapshot in staged {
            let rows = committed.entry(snapshot.board_id).or_default();
            let at = rows.partition_point(|s| s.iteration < snapshot.iteration);
            rows.insert(at, snapshot);
        }
        Ok(())
    }
}
