//! Grid-subsystem error type.

use thiserror::Error;

use rg_core::Position;

/// Errors produced by `rg-grid` while constructing maps.
///
/// Queries never fail: out-of-range lookups return empty masks or ∞.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {pos} is outside the {height}x{width} grid")]
    OutOfBounds { pos: Position, height: usize, width: usize },

    #[error("expected {expected} cells, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type GridResult<T> = Result<T, GridError>;
