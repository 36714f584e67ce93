//! Flat cell indexing and the `CellSet` bitset used for all board bookkeeping.
//!
//! The board is a fixed 10×10 grid addressed either by a flat index in
//! `0..100` or a `(row, col)` pair. Sets of cells (ship footprints, hits,
//! misses) are packed into a single `u128`.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: usize = 10;
/// Total number of addressable cells.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Flat cell address in `0..NUM_CELLS`.
pub type CellIndex = usize;

/// What a board cell looks like from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied,
    Hit,
    Miss,
}

/// Convert a flat index to `(row, col)`. Out-of-range indices are a caller
/// contract violation and fail fast.
#[inline]
pub fn index_to_row_col(index: CellIndex) -> (usize, usize) {
    assert!(index < NUM_CELLS, "cell index {} out of range", index);
    (index / BOARD_SIZE, index % BOARD_SIZE)
}

/// Convert `(row, col)` to a flat index. Exact inverse of
/// [`index_to_row_col`] for all valid inputs.
#[inline]
pub fn row_col_to_index(row: usize, col: usize) -> CellIndex {
    assert!(
        row < BOARD_SIZE && col < BOARD_SIZE,
        "coordinate ({}, {}) out of range",
        row,
        col
    );
    row * BOARD_SIZE + col
}

/// In-bounds orthogonal neighbors (up, down, left, right) of a cell.
pub fn orthogonal_neighbors(index: CellIndex) -> impl Iterator<Item = CellIndex> {
    let (row, col) = index_to_row_col(index);
    let up = (row > 0).then(|| row_col_to_index(row - 1, col));
    let down = (row + 1 < BOARD_SIZE).then(|| row_col_to_index(row + 1, col));
    let left = (col > 0).then(|| row_col_to_index(row, col - 1));
    let right = (col + 1 < BOARD_SIZE).then(|| row_col_to_index(row, col + 1));
    [up, down, left, right].into_iter().flatten()
}

/// A set of board cells packed into a `u128`, one bit per cell.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellSet(u128);

impl CellSet {
    /// The empty set.
    pub const fn new() -> Self {
        CellSet(0)
    }

    /// Set containing every cell on the board.
    pub const fn full() -> Self {
        CellSet((1u128 << NUM_CELLS) - 1)
    }

    #[inline]
    fn bit(index: CellIndex) -> u128 {
        assert!(index < NUM_CELLS, "cell index {} out of range", index);
        1u128 << index
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, index: CellIndex) -> bool {
        self.0 & Self::bit(index) != 0
    }

    /// Add a cell to the set.
    #[inline]
    pub fn insert(&mut self, index: CellIndex) {
        self.0 |= Self::bit(index);
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate members in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let bits = self.0;
        (0..NUM_CELLS).filter(move |i| bits & (1u128 << i) != 0)
    }
}

impl FromIterator<CellIndex> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellIndex>>(iter: I) -> Self {
        let mut set = CellSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl BitOr for CellSet {
    type Output = CellSet;
    fn bitor(self, rhs: CellSet) -> CellSet {
        CellSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellSet {
    fn bitor_assign(&mut self, rhs: CellSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CellSet {
    type Output = CellSet;
    fn bitand(self, rhs: CellSet) -> CellSet {
        CellSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for CellSet {
    fn bitand_assign(&mut self, rhs: CellSet) {
        self.0 &= rhs.0;
    }
}

impl Not for CellSet {
    type Output = CellSet;
    fn not(self) -> CellSet {
        CellSet(!self.0 & Self::full().0)
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
