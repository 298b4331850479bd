//! Rail transition map and builder.
//!
//! # Data layout
//!
//! One `u16` mask per cell, stored row-major:
//!
//! ```text
//! cells[row * width + col]
//! ```
//!
//! See [`crate::cells`] for the bit layout.  A mask of zero marks an empty
//! cell, which is never a valid agent position.
//!
//! # Queries never fail
//!
//! Every lookup accepts any [`Position`], including ones stepped off the edge
//! of the grid.  Out-of-range cells read as empty, so callers treat them as
//! "no legal move" without a separate bounds check.

use rg_core::{Direction, Position};

use crate::cells::rotate_mask;
use crate::{GridError, GridResult};

// ── TransitionMap ─────────────────────────────────────────────────────────────

/// Static per-cell transition masks for a `height × width` grid.
///
/// Do not construct directly; use [`TransitionMapBuilder`] or
/// [`TransitionMap::from_cells`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionMap {
    pub height: usize,
    pub width: usize,
    cells: Vec<u16>,
}

impl TransitionMap {
    /// A grid with no track at all.
    pub fn empty(height: usize, width: usize) -> Self {
        Self { height, width, cells: vec![0; height * width] }
    }

    /// Wrap a row-major mask vector.  `cells.len()` must equal
    /// `height * width`.
    pub fn from_cells(height: usize, width: usize, cells: Vec<u16>) -> GridResult<Self> {
        if cells.len() != height * width {
            return Err(GridError::DimensionMismatch {
                expected: height * width,
                got:      cells.len(),
            });
        }
        Ok(Self { height, width, cells })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Total number of cells, track or not.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of non-empty cells.
    pub fn rail_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&m| m != 0).count()
    }

    /// Raw row-major masks.
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    /// `true` if `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Row-major index of `pos`, or `None` if it lies outside the grid.
    #[inline]
    pub fn cell_index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row as usize * self.width + pos.col as usize)
    }

    /// Inverse of [`cell_index`](Self::cell_index).
    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index / self.width) as i32, (index % self.width) as i32)
    }

    // ── Transition queries ────────────────────────────────────────────────

    /// Full 16-bit mask of `pos`; 0 when out of bounds.
    #[inline]
    pub fn transitions(&self, pos: Position) -> u16 {
        self.cell_index(pos).map_or(0, |i| self.cells[i])
    }

    /// 4-bit mask of legal exits for an agent facing `entry` in `pos`.
    #[inline]
    pub fn transitions_for_entry(&self, pos: Position, entry: Direction) -> u8 {
        ((self.transitions(pos) >> (entry.index() * 4)) & 0xF) as u8
    }

    #[inline]
    pub fn is_transition_allowed(&self, pos: Position, entry: Direction, exit: Direction) -> bool {
        self.transitions_for_entry(pos, entry) & (1 << exit.index()) != 0
    }

    /// In bounds and carrying at least one transition.
    #[inline]
    pub fn is_valid_cell(&self, pos: Position) -> bool {
        self.transitions(pos) != 0
    }

    /// A dead end carries exactly one transition over all entry headings.
    #[inline]
    pub fn is_dead_end(&self, pos: Position) -> bool {
        self.transitions(pos).count_ones() == 1
    }

    /// Legal exits for an agent in `pos` facing `heading`.
    ///
    /// Identical to [`transitions_for_entry`](Self::transitions_for_entry)
    /// except in dead ends: there an agent whose heading has no encoded exit
    /// (one spawned facing the buffer stop, say) leaves through the cell's
    /// single open side.  No exit ever crosses the closed side.  Movement,
    /// distance maps and tree observations all go through this method so
    /// they agree on dead ends.
    #[inline]
    pub fn exits(&self, pos: Position, heading: Direction) -> u8 {
        let exits = self.transitions_for_entry(pos, heading);
        if exits == 0 && self.is_dead_end(pos) {
            // The one set bit is `entry * 4 + exit`.
            1 << (self.transitions(pos).trailing_zeros() % 4)
        } else {
            exits
        }
    }

    // ── Whole-map transforms ──────────────────────────────────────────────

    /// Where `pos` lands after [`rotated_cw`](Self::rotated_cw).
    #[inline]
    pub fn rotate_position_cw(&self, pos: Position) -> Position {
        Position::new(pos.col, self.height as i32 - 1 - pos.row)
    }

    /// The map rotated 90° clockwise.  The result is `width × height`.
    pub fn rotated_cw(&self) -> TransitionMap {
        let mut out = TransitionMap::empty(self.width, self.height);
        for (i, &mask) in self.cells.iter().enumerate() {
            let to = self.rotate_position_cw(self.position_of(i));
            let j = to.row as usize * out.width + to.col as usize;
            out.cells[j] = rotate_mask(mask, 1);
        }
        out
    }
}

// ── TransitionMapBuilder ──────────────────────────────────────────────────────

/// Construct a [`TransitionMap`] cell by cell, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rg_core::Position;
/// use rg_grid::TransitionMapBuilder;
/// use rg_grid::cells::STRAIGHT_EW;
///
/// let mut b = TransitionMapBuilder::new(1, 3);
/// for col in 0..3 {
///     b.set(Position::new(0, col), STRAIGHT_EW).unwrap();
/// }
/// let rail = b.build();
/// assert_eq!(rail.rail_cell_count(), 3);
/// ```
pub struct TransitionMapBuilder {
    map: TransitionMap,
}

impl TransitionMapBuilder {
    /// Start from an all-empty `height × width` grid.
    pub fn new(height: usize, width: usize) -> Self {
        Self { map: TransitionMap::empty(height, width) }
    }

    /// Overwrite the mask at `pos`.
    pub fn set(&mut self, pos: Position, mask: u16) -> GridResult<&mut Self> {
        let i = self.map.cell_index(pos).ok_or(GridError::OutOfBounds {
            pos,
            height: self.map.height,
            width:  self.map.width,
        })?;
        self.map.cells[i] = mask;
        Ok(self)
    }

    /// Lay the same mask along a horizontal run of cells in `row`.
    pub fn set_row_run(&mut self, row: i32, cols: std::ops::Range<i32>, mask: u16) -> GridResult<&mut Self> {
        for col in cols {
            self.set(Position::new(row, col), mask)?;
        }
        Ok(self)
    }

    /// Lay the same mask along a vertical run of cells in `col`.
    pub fn set_col_run(&mut self, col: i32, rows: std::ops::Range<i32>, mask: u16) -> GridResult<&mut Self> {
        for row in rows {
            self.set(Position::new(row, col), mask)?;
        }
        Ok(self)
    }

    pub fn build(self) -> TransitionMap {
        self.map
    }
}
