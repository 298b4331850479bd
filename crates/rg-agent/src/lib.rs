//! `rg-agent` — Structure-of-Arrays agent storage for the `railgrid`
//! framework.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`spawn`]   | `AgentStatic` (start, start heading, target, speed)        |
//! | [`store`]   | `AgentStore` (static + dynamic SoA arrays)                 |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod builder;
pub mod spawn;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use spawn::AgentStatic;
pub use store::AgentStore;
