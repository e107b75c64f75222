//! Concurrent execution of queued boards.
//!
//! Each request runs [`ConvergenceController::run_to_completion`] on its
//! own store session in a spawned task. A semaphore caps the number of
//! boards in flight; while it is exhausted the worker stops pulling
//! messages. Failures are logged and the message is dropped.

use std::future::Future;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use gol_core::{
    BoardSnapshot, CancellationToken, ConvergenceController, ProcessError, SnapshotStore,
};
use gol_types::{BoardId, ScheduleBoardMessage};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::error::WorkerError;

/// Runs queued boards against a snapshot store.
pub struct BoardWorker<S> {
    store: S,
    permits: Arc<Semaphore>,
    cancel: CancellationToken,
    tasks: JoinSet<()>,
}

impl<S: SnapshotStore> BoardWorker<S> {
    /// Create a worker running at most `max_concurrent` boards at once.
    ///
    /// A limit of zero is treated as one.
    pub fn new(store: S, max_concurrent: usize, cancel: CancellationToken) -> Self {
        Self {
            store,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            cancel,
            tasks: JoinSet::new(),
        }
    }

    /// Decode one message and run its board to completion on the calling
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Decode`] for a malformed payload and
    /// [`WorkerError::Process`] if the board cannot be run.
    pub async fn process_payload(&self, payload: &[u8]) -> Result<BoardSnapshot, WorkerError> {
        let message = ScheduleBoardMessage::from_payload(payload)?;
        Ok(run_board(self.store.clone(), message.board_id, &self.cancel).await?)
    }

    /// Consume messages until the stream ends or `shutdown` resolves, then
    /// wait for every board in flight.
    ///
    /// On shutdown the cancellation token is cancelled, so running boards
    /// stop at their next generation boundary.
    pub async fn run<M, F>(mut self, mut messages: M, shutdown: F)
    where
        M: Stream<Item = Vec<u8>> + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                next = messages.next() => match next {
                    Some(payload) => self.dispatch(payload).await,
                    None => {
                        info!("Message stream closed");
                        break;
                    }
                },
                () = &mut shutdown => {
                    info!("Shutdown requested, cancelling boards in flight");
                    self.cancel.cancel();
                    break;
                }
            }
        }

        self.drain().await;
    }

    /// Spawn the board named by `payload`, waiting for a free slot first.
    async fn dispatch(&mut self, payload: Vec<u8>) {
        let message = match ScheduleBoardMessage::from_payload(&payload) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Discarding malformed board request");
                return;
            }
        };

        let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
            error!("Worker semaphore closed");
            return;
        };

        // Reap finished tasks so the set does not grow without bound.
        while let Some(result) = self.tasks.try_join_next() {
            log_join_result(result);
        }

        let store = self.store.clone();
        let cancel = self.cancel.clone();
        let board_id = message.board_id;
        debug!(%board_id, "Board dispatched");

        self.tasks.spawn(async move {
            let _permit = permit;
            match run_board(store, board_id, &cancel).await {
                Ok(snapshot) => info!(
                    %board_id,
                    iteration = snapshot.iteration,
                    status = %snapshot.status,
                    "Board processed"
                ),
                Err(ProcessError::Cancelled) => info!(%board_id, "Board processing cancelled"),
                Err(e) => error!(%board_id, error = %e, "Board processing failed"),
            }
        });
    }

    /// Wait for every spawned board to finish.
    async fn drain(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            log_join_result(result);
        }
    }
}

async fn run_board<S: SnapshotStore>(
    store: S,
    board_id: BoardId,
    cancel: &CancellationToken,
) -> Result<BoardSnapshot, ProcessError> {
    ConvergenceController::new(store)
        .run_to_completion(board_id, cancel)
        .await
}

fn log_join_result(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        error!(error = %e, "Board task failed to complete");
    }
}
