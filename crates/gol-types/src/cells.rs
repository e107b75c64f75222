//! Cell coordinates and live-cell sets.
//!
//! The grid is unbounded: a [`Coordinate`] is any pair of signed 32-bit
//! integers and only live cells are ever materialized. On the wire a
//! coordinate is the two-element array `[row, col]`, and a [`LiveCells`] set
//! is an array of those pairs in canonical (row, then column) order. Stored
//! rows, API payloads and queue messages all share this shape.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A cell position on the unbounded grid.
///
/// Ordering is by row, then by column. That ordering is the canonical order
/// used for fingerprints and for the compact storage encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    row: i32,
    col: i32,
}

impl Coordinate {
    /// Create a coordinate from a row and a column.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The row component.
    pub const fn row(self) -> i32 {
        self.row
    }

    /// The column component.
    pub const fn col(self) -> i32 {
        self.col
    }

    /// The coordinate shifted by `(d_row, d_col)`.
    ///
    /// Returns `None` when the result is not representable as an `i32` pair.
    pub const fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        match (self.row.checked_add(d_row), self.col.checked_add(d_col)) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.row, self.col).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (row, col) = <(i32, i32)>::deserialize(deserializer)?;
        Ok(Self::new(row, col))
    }
}

/// The set of live cells of one generation.
///
/// Backed by an ordered set, so duplicates collapse on construction and
/// iteration always yields canonical order regardless of how the set was
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiveCells(BTreeSet<Coordinate>);

impl LiveCells {
    /// An empty set (a dead board).
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given cell is alive.
    pub fn contains(&self, cell: &Coordinate) -> bool {
        self.0.contains(cell)
    }

    /// Mark a cell alive. Returns `false` if it already was.
    pub fn insert(&mut self, cell: Coordinate) -> bool {
        self.0.insert(cell)
    }

    /// Iterate live cells in canonical order.
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, Coordinate> {
        self.0.iter()
    }

    /// Encode as the compact `[[row,col],...]` text used at the storage
    /// boundary.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; with plain integer pairs this does not
    /// happen in practice.
    pub fn to_compact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode the compact `[[row,col],...]` text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not an array of two-integer arrays.
    pub fn from_compact_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl FromIterator<Coordinate> for LiveCells {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Coordinate> for LiveCells {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for LiveCells {
    type Item = Coordinate;
    type IntoIter = std::collections::btree_set::IntoIter<Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LiveCells {
    type Item = &'a Coordinate;
    type IntoIter = std::collections::btree_set::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
