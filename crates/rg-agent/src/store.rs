//! Core agent storage: `AgentStore`.
//!
//! Static spawn data and dynamic movement state live side by side as
//! parallel `Vec`s.  The `AgentId` value is the index into all of them:
//!
//! ```ignore
//! let pos = store.position[agent.index()];
//! ```
//!
//! Only the step engine writes the dynamic arrays, once per agent per tick,
//! in ascending handle order.

use rg_core::{AgentId, Direction, Position, RailAction};

use crate::AgentStatic;

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Static data ───────────────────────────────────────────────────────
    pub start:           Vec<Position>,
    pub start_direction: Vec<Direction>,
    pub target:          Vec<Position>,
    /// Cells per tick, in `(0, 1]`.
    pub speed:           Vec<f32>,

    // ── Dynamic state ─────────────────────────────────────────────────────
    pub position:  Vec<Position>,
    pub direction: Vec<Direction>,
    pub moving:    Vec<bool>,

    /// Progress through the current cell in `[0, 1]`.  Reaches 1 only while
    /// the agent waits for a blocked exit.
    pub position_fraction: Vec<f32>,

    /// Movement selected at the last cell boundary; consumed when the agent
    /// commits to the next cell.
    pub exit_action: Vec<Option<RailAction>>,

    /// Position and heading at the start of the current tick.
    pub old_position:  Vec<Position>,
    pub old_direction: Vec<Direction>,
}

impl AgentStore {
    /// Store with one agent per entry of `statics`, already restarted.
    pub fn from_statics(statics: &[AgentStatic]) -> Self {
        let mut store = Self::default();
        for s in statics {
            store.push(*s);
        }
        store
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Append an agent, initialised at its start.  Returns its handle.
    pub fn push(&mut self, s: AgentStatic) -> AgentId {
        let id = AgentId(self.count as u32);
        self.start.push(s.start);
        self.start_direction.push(s.start_direction);
        self.target.push(s.target);
        self.speed.push(s.speed);

        self.position.push(s.start);
        self.direction.push(s.start_direction);
        self.moving.push(false);
        self.position_fraction.push(0.0);
        self.exit_action.push(None);
        self.old_position.push(s.start);
        self.old_direction.push(s.start_direction);

        self.count += 1;
        id
    }

    /// Static data of one agent.
    pub fn static_of(&self, agent: AgentId) -> AgentStatic {
        let i = agent.index();
        AgentStatic {
            start:           self.start[i],
            start_direction: self.start_direction[i],
            target:          self.target[i],
            speed:           self.speed[i],
        }
    }

    /// Static data of every agent, in handle order.
    pub fn statics(&self) -> Vec<AgentStatic> {
        self.agent_ids().map(|a| self.static_of(a)).collect()
    }

    /// Reset every agent's dynamic state from its static data: back on the
    /// start cell, stationary, fraction 0, no pending exit.
    pub fn restart(&mut self) {
        for i in 0..self.count {
            self.position[i] = self.start[i];
            self.direction[i] = self.start_direction[i];
            self.moving[i] = false;
            self.position_fraction[i] = 0.0;
            self.exit_action[i] = None;
            self.old_position[i] = self.start[i];
            self.old_direction[i] = self.start_direction[i];
        }
    }

    // ── Per-agent queries ─────────────────────────────────────────────────

    /// `true` when the agent has not started into its current cell, i.e.
    /// the point where a new action may be validated.
    #[inline]
    pub fn is_at_boundary(&self, agent: AgentId) -> bool {
        self.position_fraction[agent.index()] == 0.0
    }

    #[inline]
    pub fn is_at_target(&self, agent: AgentId) -> bool {
        self.position[agent.index()] == self.target[agent.index()]
    }

    /// `true` when every agent sits on its target.  Vacuously true for an
    /// empty store.
    pub fn all_at_target(&self) -> bool {
        self.agent_ids().all(|a| self.is_at_target(a))
    }

    /// Snapshot position and heading into the `old_*` arrays.
    #[inline]
    pub fn remember_previous(&mut self, agent: AgentId) {
        let i = agent.index();
        self.old_position[i] = self.position[i];
        self.old_direction[i] = self.direction[i];
    }
}
