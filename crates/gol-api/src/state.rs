//! Shared application state for the board API.

use gol_core::config::BoardConfig;
use gol_core::{CancellationToken, ConvergenceController, SnapshotStore};

use crate::schedule::BoardScheduler;

/// State shared by every request handler.
///
/// The store is a template session: each request clones it, so requests
/// never share staged writes.
#[derive(Debug)]
pub struct AppState<S> {
    /// Snapshot store session cloned per request.
    pub store: S,
    /// Limits applied to step counts and attempt budgets.
    pub board: BoardConfig,
    /// Publisher for background processing, when NATS is configured.
    pub scheduler: Option<BoardScheduler>,
    /// Cancelled when the server shuts down, stopping long requests between
    /// generations.
    pub shutdown: CancellationToken,
}

impl<S: SnapshotStore> AppState<S> {
    /// State without background scheduling.
    pub fn new(store: S, board: BoardConfig) -> Self {
        Self {
            store,
            board,
            scheduler: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// Enable background scheduling.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: BoardScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// A controller over a fresh store session.
    pub fn controller(&self) -> ConvergenceController<S> {
        ConvergenceController::new(self.store.clone())
    }
}
