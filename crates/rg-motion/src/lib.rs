//! `rg-motion` — per-agent movement for one environment tick.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`check`]  | `check_action`, `MoveCheck`: legality of one action            |
//! | [`engine`] | `MotionEngine`, `MotionReport`: fractional movement + commits  |
//!
//! # Movement model (fractional progress, commit on exit)
//!
//! 1. At a cell boundary (`position_fraction == 0`) a movement action is
//!    validated against the transition map and stored as the agent's
//!    pending exit action.
//! 2. While moving, the fraction grows by the agent's speed each tick.
//! 3. Once it reaches 1 the pending exit is committed if the destination
//!    cell is free.  Otherwise the agent waits in place with the fraction
//!    held at 1 and retries every tick.
//!
//! The environment calls [`MotionEngine::advance`] once per agent per tick
//! in ascending handle order.  Occupancy is read live, so an agent sees the
//! moves already committed by lower handles during the same tick.

pub mod check;
pub mod engine;


pub use check::{MoveCheck, check_action};
pub use engine::{MotionEngine, MotionReport};
