//! Shared type definitions for the Game of Life board service.
//!
//! This crate is the single source of truth for the values that cross crate
//! and process boundaries: coordinates and live-cell sets, board status,
//! identifiers, fingerprints, API views and queue messages. API-facing types
//! flow to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for boards and generations
//! - [`cells`] -- [`Coordinate`] and [`LiveCells`] with their wire encoding
//! - [`enums`] -- [`BoardStatus`] and its persisted codes
//! - [`structs`] -- [`Fingerprint`] and API response bodies
//! - [`messages`] -- Background processing queue messages

pub mod cells;
pub mod enums;
pub mod ids;
pub mod messages;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use cells::{Coordinate, LiveCells};
pub use enums::BoardStatus;
pub use ids::{BoardId, SnapshotId};
pub use messages::{BOARD_PROCESSING_SUBJECT, ScheduleBoardMessage};
pub use structs::{BoardStateView, CreateBoardResponse, Fingerprint};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for API-facing types.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::BoardId::export_all();
        let _ = crate::ids::SnapshotId::export_all();
        let _ = crate::enums::BoardStatus::export_all();
        let _ = crate::structs::BoardStateView::export_all();
        let _ = crate::structs::CreateBoardResponse::export_all();
    }
}
