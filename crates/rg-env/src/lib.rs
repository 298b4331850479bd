//! `rg-env` — the multi-agent rail environment.
//!
//! # Episode lifecycle
//!
//! ```text
//! build  → first reset (episode counter forced back to 0)
//! reset  → generator → validate spawns → distance map → restart agents
//!          → observation builder reset → observations
//! step   → for each agent in ascending handle order:
//!            sanitise action → motion advance → rewards → done flag
//!          → episode completion → observations
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | Distance maps and observations are built on Rayon.           |
//! | `serde`    | Serde derives on core, grid and agent types.                 |
//!
//! The step itself is always sequential: agents are resolved strictly in
//! handle order, each seeing the moves already made by lower handles.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rg_env::{FixedRail, RailEnvBuilder};
//! use rg_obs::TreeObsBuilder;
//!
//! let mut env = RailEnvBuilder::new(1, 3, FixedRail::new(rail, agents), TreeObsBuilder::new(2)?)
//!     .build()?;
//! let obs = env.reset()?;
//! let result = env.step(&HashMap::from([(AgentId(0), 2)]));
//! ```

pub mod builder;
pub mod env;
pub mod error;
pub mod generator;
pub mod observer;


pub use builder::RailEnvBuilder;
pub use env::{RailEnv, StepResult};
pub use error::{EnvError, EnvResult};
pub use generator::{FixedRail, GeneratedRail, RailGenerator};
pub use observer::{EnvObserver, NoopObserver};
