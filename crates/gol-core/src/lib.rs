//! Transition engine, fingerprinting and convergence control for Game of
//! Life boards.
//!
//! A board is a chain of generations kept in a [`SnapshotStore`]. The
//! [`ConvergenceController`] extends that chain one generation at a time and
//! classifies the board as soon as its fate is known: it died out, settled,
//! started repeating, or ran past the iteration ceiling.
//!
//! # Modules
//!
//! - [`transition`] -- The B3/S23 rule over an unbounded sparse grid.
//! - [`fingerprint`] -- Order-independent 64-bit hash of a live-cell set.
//! - [`snapshot`] -- [`BoardSnapshot`], one stored generation.
//! - [`store`] -- [`SnapshotStore`] trait and [`InMemorySnapshotStore`].
//! - [`cancel`] -- [`CancellationToken`] checked between generations.
//! - [`controller`] -- [`ConvergenceController`] and [`ProcessError`].
//! - [`config`] -- Configuration loading from `gol-config.yaml`.

pub mod cancel;
pub mod config;
pub mod controller;
pub mod fingerprint;
pub mod snapshot;
pub mod store;
pub mod transition;

pub use cancel::CancellationToken;
pub use controller::{ConvergenceController, INFINITE_CEILING, ProcessError};
pub use snapshot::BoardSnapshot;
pub use store::{InMemorySnapshotStore, SnapshotStore, StoreError};
