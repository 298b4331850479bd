//! `rg-grid` — rail transition map, distance maps, and cell occupancy.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`cells`]       | Mask encoding helpers, track presets, `RailCell`          |
//! | [`transitions`] | `TransitionMap`, `TransitionMapBuilder`                   |
//! | [`distance`]    | `DistanceMap` (backward BFS per agent), `StateBitset`     |
//! | [`occupancy`]   | `OccupancyGrid` per-cell counters                         |
//! | [`error`]       | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Builds per-agent distance layers on Rayon.                |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `TransitionMap`.     |

pub mod cells;
pub mod distance;
pub mod error;
pub mod occupancy;
pub mod transitions;

#[cfg(test)]
mod tests;

pub use cells::RailCell;
pub use distance::{DistanceMap, StateBitset};
pub use error::{GridError, GridResult};
pub use occupancy::OccupancyGrid;
pub use transitions::{TransitionMap, TransitionMapBuilder};
