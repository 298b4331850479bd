//! Dense per-cell counters for agent positions and target membership.
//!
//! The step engine keeps one `OccupancyGrid` of current agent positions and
//! updates it on every committed move, so "is the destination free?" is a
//! single array read.  The environment builds a second grid of targets at
//! reset.  Both are passed explicitly to observation builders each tick.

use rg_core::Position;

/// Number of agents (or targets) per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    height: usize,
    width: usize,
    counts: Vec<u16>,
}

impl OccupancyGrid {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width, counts: vec![0; height * width] }
    }

    /// Count every position in `positions`.  Out-of-range entries are
    /// ignored.
    pub fn from_positions<I>(height: usize, width: usize, positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut grid = Self::new(height, width);
        for pos in positions {
            grid.add(pos);
        }
        grid
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width)
            .then(|| pos.row as usize * self.width + pos.col as usize)
    }

    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    #[inline]
    pub fn add(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.counts[i] = self.counts[i].saturating_add(1);
        }
    }

    #[inline]
    pub fn remove(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.counts[i] = self.counts[i].saturating_sub(1);
        }
    }

    /// Move one occupant from `from` to `to`.
    #[inline]
    pub fn move_from_to(&mut self, from: Position, to: Position) {
        self.remove(from);
        self.add(to);
    }

    /// Occupants of `pos`; 0 when out of bounds.
    #[inline]
    pub fn count(&self, pos: Position) -> u16 {
        self.index(pos).map_or(0, |i| self.counts[i])
    }

    /// In bounds and unoccupied.
    #[inline]
    pub fn is_free(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.counts[i] == 0)
    }

    /// `true` if `pos` holds an occupant other than the caller, whose own
    /// entry sits at `own`.
    #[inline]
    pub fn occupied_by_others(&self, pos: Position, own: Position) -> bool {
        let n = self.count(pos);
        if pos == own { n > 1 } else { n > 0 }
    }

    /// Total occupants across the grid.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}
