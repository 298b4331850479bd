//! Per-agent data fixed for the whole episode.

use rg_core::{Direction, Position};

/// Where an agent starts, where it must go, and how fast it moves.
///
/// `speed` is the fraction of a cell advanced per tick while moving; the
/// environment rejects values outside `(0, 1]` at reset.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStatic {
    pub start:           Position,
    pub start_direction: Direction,
    pub target:          Position,
    pub speed:           f32,
}

impl AgentStatic {
    /// Full-speed agent (one cell per tick).
    pub fn new(start: Position, start_direction: Direction, target: Position) -> Self {
        Self { start, start_direction, target, speed: 1.0 }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// `true` when `speed` lies in `(0, 1]`.
    pub fn has_valid_speed(&self) -> bool {
        self.speed > 0.0 && self.speed <= 1.0
    }
}
