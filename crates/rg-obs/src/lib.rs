//! `rg-obs` — per-agent observations of the rail network.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`builder`] | `ObservationBuilder`, the observation extension point         |
//! | [`context`] | `ObsContext`, a read-only post-step snapshot                  |
//! | [`tree`]    | `TreeObsBuilder`: fixed-shape branch tree per agent           |
//! | [`node`]    | `NodeFeatures`, tree size helpers, `TreeView`, normalisation  |
//! | [`global`]  | `GlobalObsBuilder`, `GlobalObservation` (whole-grid layers)   |
//! | [`error`]   | `ObsError`, `ObsResult<T>`                                    |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `ObservationBuilder::get_many` fans out over Rayon.        |

pub mod builder;
pub mod context;
pub mod error;
pub mod global;
pub mod node;
pub mod tree;


pub use builder::ObservationBuilder;
pub use context::ObsContext;
pub use error::{ObsError, ObsResult};
pub use global::{GlobalObsBuilder, GlobalObservation};
pub use node::{NodeFeatures, TreeView, normalize_observation, observation_len, tree_node_count};
pub use tree::{MAX_TREE_DEPTH, TreeObsBuilder};
