//! One persisted generation of a board.

use gol_types::{BoardId, BoardStateView, BoardStatus, Fingerprint, LiveCells, SnapshotId};

use crate::fingerprint::fingerprint;

/// A generation of a board as stored by a [`SnapshotStore`].
///
/// `fingerprint` is always the hash of `live_cells`; the constructors keep
/// the two in sync.
///
/// [`SnapshotStore`]: crate::store::SnapshotStore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Unique row identifier.
    pub id: SnapshotId,
    /// The board this generation belongs to.
    pub board_id: BoardId,
    /// Generation number, 0 for the initial state.
    pub iteration: u64,
    /// Live cells of this generation.
    pub live_cells: LiveCells,
    /// Hash of `live_cells`.
    pub fingerprint: Fingerprint,
    /// Classification of this generation.
    pub status: BoardStatus,
}

impl BoardSnapshot {
    /// Iteration-0 snapshot of a new board.
    pub fn initial(board_id: BoardId, live_cells: LiveCells) -> Self {
        Self {
            id: SnapshotId::new(),
            board_id,
            iteration: 0,
            fingerprint: fingerprint(&live_cells),
            live_cells,
            status: BoardStatus::NotFinished,
        }
    }

    /// The candidate generation that follows `previous`.
    ///
    /// The status is copied from `previous`; the controller decides whether
    /// a still-open board becomes terminal.
    pub fn successor(previous: &Self, live_cells: LiveCells) -> Self {
        Self {
            id: SnapshotId::new(),
            board_id: previous.board_id,
            iteration: previous.iteration.saturating_add(1),
            fingerprint: fingerprint(&live_cells),
            live_cells,
            status: previous.status,
        }
    }

    /// The public view of this generation.
    pub fn to_view(&self) -> BoardStateView {
        BoardStateView {
            board_id: self.board_id,
            live_cells: self.live_cells.clone(),
            iteration: self.iteration,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use gol_types::Coordinate;

    use super::*;

    #[test]
    fn successor_inherits_board_and_status() {
        let board_id = BoardId::new();
        let mut first = BoardSnapshot::initial(board_id, LiveCells::new());
        first.status = BoardStatus::Stable;

        let cells: LiveCells = std::iter::once(Coordinate::new(1, 1)).collect();
        let next = BoardSnapshot::successor(&first, cells.clone());

        assert_eq!(next.board_id, board_id);
        assert_eq!(next.iteration, 1);
        assert_eq!(next.status, BoardStatus::Stable);
        assert_eq!(next.fingerprint, fingerprint(&cells));
        assert_ne!(next.id, first.id);
    }

    #[test]
    fn view_carries_the_public_fields() {
        let snapshot = BoardSnapshot::initial(BoardId::new(), LiveCells::new());
        let view = snapshot.to_view();
        assert_eq!(view.board_id, snapshot.board_id);
        assert_eq!(view.iteration, 0);
        assert_eq!(view.status, BoardStatus::NotFinished);
    }
}
