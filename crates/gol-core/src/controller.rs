//! Convergence controller: advances boards and classifies their fate.
//!
//! Each step loads nothing new; it derives the next generation from the one
//! it just wrote, classifies it, and commits it before moving on. A board is
//! classified at most once. After that the generations keep coming but
//! inherit the terminal status unchanged.
//!
//! Classification of a candidate whose predecessor is still
//! [`BoardStatus::NotFinished`], in order:
//!
//! 1. No live cells: [`BoardStatus::FadedAway`].
//! 2. An earlier generation of the same board has the same fingerprint:
//!    [`BoardStatus::Stable`] if it is the immediate predecessor, otherwise
//!    [`BoardStatus::Oscillatory`].
//! 3. The candidate sits exactly on [`INFINITE_CEILING`]:
//!    [`BoardStatus::Infinite`].

use gol_types::{BoardId, BoardStatus, Coordinate};
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::snapshot::BoardSnapshot;
use crate::store::{SnapshotStore, StoreError};
use crate::transition::compute_next_generation;

/// Iteration at which a board that never repeated is declared infinite.
///
/// Also the budget used by [`ConvergenceController::run_to_completion`].
pub const INFINITE_CEILING: u64 = 10_000;

/// Errors returned by the controller.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The board has no generations in the store.
    #[error("board {board_id} was not found")]
    NotFound {
        /// The requested board.
        board_id: BoardId,
    },

    /// The iteration budget ran out before the board reached a terminal
    /// status.
    #[error("After {iterations} iterations, the board did not go to conclusion.")]
    NonConvergence {
        /// The exhausted budget.
        iterations: u64,
    },

    /// Processing stopped because cancellation was requested.
    #[error("board processing was cancelled")]
    Cancelled,

    /// The request could not be acted on.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The snapshot store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives boards forward through a [`SnapshotStore`].
///
/// One controller owns one store session. Boards processed concurrently
/// should each get their own controller over a clone of the store.
#[derive(Debug)]
pub struct ConvergenceController<S> {
    store: S,
}

impl<S: SnapshotStore> ConvergenceController<S> {
    /// Create a controller over a store session.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store session.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store session.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Create a board from its initial live cells.
    ///
    /// Duplicate coordinates collapse. An empty list is a valid (already
    /// dead) board; a missing list is rejected.
    pub async fn start_board(
        &mut self,
        live_cells: Option<Vec<Coordinate>>,
    ) -> Result<BoardSnapshot, ProcessError> {
        let Some(cells) = live_cells else {
            return Err(ProcessError::InvalidInput(
                "live cells were not provided".to_owned(),
            ));
        };

        let snapshot = BoardSnapshot::initial(BoardId::new(), cells.into_iter().collect());
        self.store.add(snapshot.clone()).await?;
        self.store.commit().await?;

        info!(
            board_id = %snapshot.board_id,
            live_cells = snapshot.live_cells.len(),
            "Board created"
        );
        Ok(snapshot)
    }

    /// The most recent generation of a board.
    pub async fn latest(&self, board_id: BoardId) -> Result<BoardSnapshot, ProcessError> {
        self.store
            .latest_by_board(board_id)
            .await?
            .ok_or(ProcessError::NotFound { board_id })
    }

    /// Advance a board by up to `max_iterations` generations.
    ///
    /// Every generation is committed before the next one is computed. With
    /// `stop_at_terminal`, the call returns as soon as a terminal generation
    /// is written and fails with [`ProcessError::NonConvergence`] if the
    /// budget runs out first. Without it, the call always runs the full
    /// budget and returns the last generation.
    ///
    /// Cancellation is observed before each generation, so a cancelled call
    /// leaves every committed generation in place and writes nothing
    /// partial.
    pub async fn process(
        &mut self,
        board_id: BoardId,
        max_iterations: u64,
        stop_at_terminal: bool,
        cancel: &CancellationToken,
    ) -> Result<BoardSnapshot, ProcessError> {
        let mut current = self.latest(board_id).await?;

        debug!(
            %board_id,
            from_iteration = current.iteration,
            max_iterations,
            stop_at_terminal,
            "Processing board"
        );

        for _ in 0..max_iterations {
            if cancel.is_cancelled() {
                info!(%board_id, iteration = current.iteration, "Board processing cancelled");
                return Err(ProcessError::Cancelled);
            }

            let next_cells = compute_next_generation(&current.live_cells);
            let mut candidate = BoardSnapshot::successor(&current, next_cells);

            if current.status == BoardStatus::NotFinished {
                candidate.status = self.classify(&candidate).await?;
                if candidate.status.is_terminal() {
                    info!(
                        %board_id,
                        iteration = candidate.iteration,
                        status = %candidate.status,
                        "Board reached terminal status"
                    );
                }
            }

            self.store.add(candidate.clone()).await?;
            self.store.commit().await?;
            current = candidate;

            if stop_at_terminal && current.status.is_terminal() {
                return Ok(current);
            }
        }

        if stop_at_terminal && !current.status.is_terminal() {
            warn!(%board_id, iterations = max_iterations, "Board did not converge");
            return Err(ProcessError::NonConvergence {
                iterations: max_iterations,
            });
        }

        Ok(current)
    }

    /// Run a board until it reaches a terminal status.
    ///
    /// Equivalent to [`process`](Self::process) with a budget of
    /// [`INFINITE_CEILING`] and early stop enabled. Since the ceiling itself
    /// classifies the board as infinite, this only fails when the board
    /// already started beyond the ceiling or on cancellation and storage
    /// errors.
    pub async fn run_to_completion(
        &mut self,
        board_id: BoardId,
        cancel: &CancellationToken,
    ) -> Result<BoardSnapshot, ProcessError> {
        self.process(board_id, INFINITE_CEILING, true, cancel).await
    }

    /// Status for a candidate whose predecessor is still open.
    async fn classify(&self, candidate: &BoardSnapshot) -> Result<BoardStatus, StoreError> {
        if candidate.live_cells.is_empty() {
            return Ok(BoardStatus::FadedAway);
        }

        let repeat = self
            .store
            .latest_by_board_and_fingerprint(candidate.board_id, candidate.fingerprint)
            .await?;

        if let Some(earlier) = repeat.filter(|earlier| earlier.id != candidate.id) {
            let period = candidate.iteration.saturating_sub(earlier.iteration);
            return Ok(if period == 1 {
                BoardStatus::Stable
            } else {
                BoardStatus::Oscillatory
            });
        }

        if candidate.iteration == INFINITE_CEILING {
            return Ok(BoardStatus::Infinite);
        }

        Ok(BoardStatus::NotFinished)
    }
}
