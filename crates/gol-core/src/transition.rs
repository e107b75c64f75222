//! Conway's B3/S23 rule on an unbounded grid.
//!
//! Only live cells are stored, so the work per generation is proportional to
//! the population rather than to any bounding box. Every live cell adds one
//! to the neighbor count of its eight surrounding positions; the positions
//! that received at least one count are the only candidates for the next
//! generation.

use std::collections::HashMap;

use gol_types::{Coordinate, LiveCells};

/// Offsets of the eight Moore neighbors, `(d_row, d_col)`.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Compute the generation that follows `current`.
///
/// A live cell survives with two or three live neighbors; a dead cell with
/// exactly three becomes alive. Everything else is dead in the result.
///
/// Neighbors that fall outside the `i32` range are not representable and
/// are skipped, so cells on that edge simply see fewer neighbors.
pub fn compute_next_generation(current: &LiveCells) -> LiveCells {
    let mut counts: HashMap<Coordinate, u8> =
        HashMap::with_capacity(current.len().saturating_mul(8));

    for cell in current {
        for (d_row, d_col) in NEIGHBOR_OFFSETS {
            if let Some(neighbor) = cell.offset(d_row, d_col) {
                let count = counts.entry(neighbor).or_insert(0);
                *count = count.saturating_add(1);
            }
        }
    }

    counts
        .into_iter()
        .filter(|(cell, count)| match count {
            3 => true,
            2 => current.contains(cell),
            _ => false,
        })
        .map(|(cell, _)| cell)
        .collect()
}
