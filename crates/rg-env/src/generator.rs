//! Rail generators: where each episode's map and agents come from.

use rg_agent::AgentStatic;
use rg_grid::TransitionMap;

use crate::EnvResult;

/// A rail map plus the agents that start on it.
#[derive(Clone, Debug)]
pub struct GeneratedRail {
    pub rail:   TransitionMap,
    pub agents: Vec<AgentStatic>,
}

/// Produces the rail and agent spawns for an episode.
///
/// Called on every reset with the environment's dimensions, the number of
/// agents it expects, and how many resets have happened so far (generators
/// may use it to vary or seed the layout).
///
/// Any `FnMut(height, width, num_agents, num_resets) -> EnvResult<GeneratedRail>`
/// closure is a generator.
pub trait RailGenerator {
    fn generate(
        &mut self,
        height:     usize,
        width:      usize,
        num_agents: usize,
        num_resets: u32,
    ) -> EnvResult<GeneratedRail>;

    /// Number of agents this generator naturally produces, if fixed.
    fn agent_hint(&self) -> Option<usize> {
        None
    }
}

impl<F> RailGenerator for F
where
    F: FnMut(usize, usize, usize, u32) -> EnvResult<GeneratedRail>,
{
    fn generate(&mut self, height: usize, width: usize, num_agents: usize, num_resets: u32) -> EnvResult<GeneratedRail> {
        self(height, width, num_agents, num_resets)
    }
}

/// Returns the same map and agents on every reset.
#[derive(Clone, Debug)]
pub struct FixedRail {
    generated: GeneratedRail,
}

impl FixedRail {
    pub fn new(rail: TransitionMap, agents: Vec<AgentStatic>) -> Self {
        Self { generated: GeneratedRail { rail, agents } }
    }
}

impl RailGenerator for FixedRail {
    fn generate(&mut self, _height: usize, _width: usize, _num_agents: usize, _num_resets: u32) -> EnvResult<GeneratedRail> {
        Ok(self.generated.clone())
    }

    fn agent_hint(&self) -> Option<usize> {
        Some(self.generated.agents.len())
    }
}
