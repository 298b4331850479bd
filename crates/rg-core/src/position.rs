//! Grid cell coordinates.
//!
//! `Position` uses signed components so that stepping off the edge of the
//! grid yields a representable (but out-of-bounds) cell instead of wrapping.
//! Bounds checks belong to the transition map, which treats any
//! out-of-range query as an empty cell.

use crate::Direction;

/// A `(row, col)` grid cell.  Row 0 is the northern edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `direction`
    /// (N: row−1, E: col+1, S: row+1, W: col−1).
    #[inline]
    pub fn step(self, direction: Direction) -> Position {
        match direction {
            Direction::North => Position::new(self.row - 1, self.col),
            Direction::East  => Position::new(self.row, self.col + 1),
            Direction::South => Position::new(self.row + 1, self.col),
            Direction::West  => Position::new(self.row, self.col - 1),
        }
    }

    /// Manhattan distance in cells.
    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
