//! `rg-core` — foundational types for the `railgrid` multi-agent rail
//! simulation.
//!
//! This crate is a dependency of every other `rg-*` crate.  It intentionally
//! has no `rg-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`direction`]   | `Direction` (N/E/S/W, encoded 0–3)                    |
//! | [`position`]    | `Position` grid cell                                  |
//! | [`action`]      | `RailAction` (the five policy actions)                |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `RewardConfig`, `EnvConfig`                           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod action;
pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod position;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::RailAction;
pub use config::{EnvConfig, RewardConfig};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use position::Position;
pub use time::Tick;
