//! Errors used by the [`TerritoryMap`](super::TerritoryMap).

use thiserror::Error;

/// Error returned when a territory index is outside the map.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("territory index {index} is out of bounds for a map of {len} territories")]
pub struct IndexError {
    /// The index that was requested.
    index: usize,

    /// Number of territories in the map.
    len: usize,
}

impl IndexError {
    /// Construct an index error for the given index and map length.
    pub(super) fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    /// Get the index that was out of bounds.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the number of territories in the map.
    pub fn len(&self) -> usize {
        self.len
    }
}
