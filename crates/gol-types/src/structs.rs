//! Value structs shared between the core, the API and the worker.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cells::LiveCells;
use crate::enums::BoardStatus;
use crate::ids::BoardId;

/// 64-bit hash summarizing a live-cell set.
///
/// Computed by `gol_core::fingerprint`. PostgreSQL has no unsigned 64-bit
/// column type, so the value is stored as the `BIGINT` with the same bit
/// pattern; see [`Fingerprint::to_storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// The raw hash value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Reinterpret the bits as a signed integer for a `BIGINT` column.
    pub const fn to_storage(self) -> i64 {
        i64::from_ne_bytes(self.0.to_ne_bytes())
    }

    /// Inverse of [`Fingerprint::to_storage`].
    pub const fn from_storage(stored: i64) -> Self {
        Self(u64::from_ne_bytes(stored.to_ne_bytes()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Public view of a board's generation, as returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardStateView {
    /// The board this generation belongs to.
    pub board_id: BoardId,
    /// Live cells as `[row, col]` pairs in canonical order.
    #[ts(type = "Array<[number, number]>")]
    pub live_cells: LiveCells,
    /// Generation number, 0 for the initial state.
    pub iteration: u64,
    /// Classification of this generation.
    pub status: BoardStatus,
}

/// Response body of a successful board creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreateBoardResponse {
    /// Identifier of the newly created board.
    pub board_id: BoardId,
}
