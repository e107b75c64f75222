//! Property-based tests for the transition engine and the fingerprint.
//!
//! Uses proptest to check that the rules hold for arbitrary boards, not just
//! the classic patterns covered by the unit tests.

#![allow(clippy::arithmetic_side_effects)]

use gol_core::fingerprint::fingerprint;
use gol_core::transition::compute_next_generation;
use gol_types::{Coordinate, LiveCells};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Boards of up to 40 cells inside a 32x32 window around the origin.
fn small_board() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-16_i32..16, -16_i32..16), 0..40)
}

fn to_cells(pairs: &[(i32, i32)]) -> LiveCells {
    pairs.iter().copied().map(Coordinate::from).collect()
}

// =============================================================================
// Fingerprint Properties
// =============================================================================

proptest! {
    /// Building the same set in any order gives the same fingerprint.
    #[test]
    fn prop_fingerprint_order_independent(pairs in small_board(), seed in any::<u64>()) {
        let mut shuffled = pairs.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(
            fingerprint(&to_cells(&pairs)),
            fingerprint(&to_cells(&shuffled))
        );
    }

    /// Repeated coordinates do not change the fingerprint.
    #[test]
    fn prop_fingerprint_ignores_duplicates(pairs in small_board()) {
        let mut doubled = pairs.clone();
        doubled.extend_from_slice(&pairs);

        prop_assert_eq!(
            fingerprint(&to_cells(&pairs)),
            fingerprint(&to_cells(&doubled))
        );
    }

    /// Equal sets always hash equal, whatever the source of the cells.
    #[test]
    fn prop_equal_sets_equal_fingerprints(pairs in small_board()) {
        let cells = to_cells(&pairs);
        let rebuilt: LiveCells = cells.iter().rev().copied().collect();
        prop_assert_eq!(&cells, &rebuilt);
        prop_assert_eq!(fingerprint(&cells), fingerprint(&rebuilt));
    }
}

// =============================================================================
// Transition Properties
// =============================================================================

proptest! {
    /// The transition is a pure function of the live-cell set.
    #[test]
    fn prop_transition_deterministic(pairs in small_board(), seed in any::<u64>()) {
        let mut shuffled = pairs.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(
            compute_next_generation(&to_cells(&pairs)),
            compute_next_generation(&to_cells(&shuffled))
        );
    }

    /// Every cell of the next generation touches a currently live cell.
    #[test]
    fn prop_births_stay_adjacent(pairs in small_board()) {
        let current = to_cells(&pairs);
        let next = compute_next_generation(&current);

        for cell in &next {
            let touches = (-1..=1).any(|dr| {
                (-1..=1).any(|dc| {
                    (dr, dc) != (0, 0)
                        && cell.offset(dr, dc).is_some_and(|n| current.contains(&n))
                })
            });
            prop_assert!(touches, "{} appeared out of nowhere", cell);
        }
    }

    /// Shifting the board shifts the result by the same amount.
    #[test]
    fn prop_transition_translation_invariant(
        pairs in small_board(),
        d_row in -1_000_i32..1_000,
        d_col in -1_000_i32..1_000,
    ) {
        let shift = |cells: &LiveCells| -> LiveCells {
            cells.iter().filter_map(|c| c.offset(d_row, d_col)).collect()
        };
        let current = to_cells(&pairs);

        prop_assert_eq!(
            shift(&compute_next_generation(&current)),
            compute_next_generation(&shift(&current))
        );
    }

    /// A block is a fixed point wherever it sits, including negative space.
    #[test]
    fn prop_block_fixed_anywhere(row in -100_000_i32..100_000, col in -100_000_i32..100_000) {
        let block = to_cells(&[(row, col), (row, col + 1), (row + 1, col), (row + 1, col + 1)]);
        prop_assert_eq!(compute_next_generation(&block), block);
    }

    /// A lone cell never survives.
    #[test]
    fn prop_isolated_cell_dies(row in any::<i32>(), col in any::<i32>()) {
        prop_assert!(compute_next_generation(&to_cells(&[(row, col)])).is_empty());
    }
}
