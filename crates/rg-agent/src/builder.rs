//! Fluent builder for `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use rg_agent::{AgentStatic, AgentStoreBuilder};
//! use rg_core::{Direction, Position};
//!
//! let store = AgentStoreBuilder::new()
//!     .agent(AgentStatic::new(Position::new(0, 0), Direction::East, Position::new(0, 2)))
//!     .agent(AgentStatic::new(Position::new(1, 0), Direction::East, Position::new(1, 2)).with_speed(0.5))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(store.position[1], Position::new(1, 0));
//! ```

use crate::{AgentStatic, AgentStore};

/// Fluent builder for [`AgentStore`].
#[derive(Default)]
pub struct AgentStoreBuilder {
    agents: Vec<AgentStatic>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `n` agents.
    pub fn with_capacity(n: usize) -> Self {
        Self { agents: Vec::with_capacity(n) }
    }

    /// Append one agent.  Handles are assigned in call order.
    pub fn agent(mut self, agent: AgentStatic) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn agents<I: IntoIterator<Item = AgentStatic>>(mut self, agents: I) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Construct the store with every agent on its start cell.
    pub fn build(self) -> AgentStore {
        AgentStore::from_statics(&self.agents)
    }
}
