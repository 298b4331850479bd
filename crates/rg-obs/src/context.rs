//! Read-only environment state passed to every observation builder.

use rg_agent::AgentStore;
use rg_core::Tick;
use rg_grid::{DistanceMap, OccupancyGrid, TransitionMap};

/// A read-only snapshot of the environment after a reset or a step.
///
/// Built by the environment each time observations are requested and
/// shared immutably across all per-agent calls, possibly from several
/// threads.
pub struct ObsContext<'a> {
    /// Ticks elapsed in the current episode.
    pub tick: Tick,

    pub rail: &'a TransitionMap,

    /// Per-agent distances to target, rebuilt on every reset.
    pub distances: &'a DistanceMap,

    pub agents: &'a AgentStore,

    /// How many agents stand in each cell (done agents included).
    pub agent_cells: &'a OccupancyGrid,

    /// How many agent targets lie in each cell.
    pub target_cells: &'a OccupancyGrid,
}

impl<'a> ObsContext<'a> {
    #[inline]
    pub fn new(
        tick:         Tick,
        rail:         &'a TransitionMap,
        distances:    &'a DistanceMap,
        agents:       &'a AgentStore,
        agent_cells:  &'a OccupancyGrid,
        target_cells: &'a OccupancyGrid,
    ) -> Self {
        Self { tick, rail, distances, agents, agent_cells, target_cells }
    }
}
