//! Order-independent 64-bit fingerprint of a live-cell set.
//!
//! The hash is an FNV-1a style fold over the cells in canonical order. Each
//! cell contributes the key `row * 31 + col`, evaluated in wrapping 32-bit
//! signed arithmetic and sign-extended to 64 bits. Because [`LiveCells`]
//! always iterates in canonical order, two sets with the same members hash
//! the same no matter how they were built.
//!
//! Collisions are possible and are not double-checked by the controller.

use gol_types::{Fingerprint, LiveCells};

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 1_469_598_103_934_665_603;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 1_099_511_628_211;

/// Hash a live-cell set.
pub fn fingerprint(cells: &LiveCells) -> Fingerprint {
    let hash = cells.iter().fold(FNV_OFFSET_BASIS, |acc, cell| {
        let key = cell.row().wrapping_mul(31).wrapping_add(cell.col());
        let extended = u64::from_ne_bytes(i64::from(key).to_ne_bytes());
        (acc ^ extended).wrapping_mul(FNV_PRIME)
    });
    Fingerprint(hash)
}
