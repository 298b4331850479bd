//! Whole-grid observation: rail bits, agent/target layers, heading.

use rg_core::{AgentId, Position};
use rg_grid::TransitionMap;

use crate::{ObsContext, ObservationBuilder};

/// Layers of [`GlobalObservation::agents_targets`].
pub const LAYER_OWN_POSITION: usize = 0;
pub const LAYER_OWN_TARGET: usize = 1;
pub const LAYER_OTHER_TARGETS: usize = 2;
pub const LAYER_OTHER_AGENTS: usize = 3;

/// Global view of the environment for one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalObservation {
    pub height: usize,
    pub width: usize,

    /// `height × width × 16`, row-major; element `k` of a cell is bit `k` of
    /// its transition mask.
    pub rail: Vec<f32>,

    /// `4 × height × width` count layers, see the `LAYER_*` constants.
    pub agents_targets: Vec<f32>,

    /// One-hot heading, indexed N, E, S, W.
    pub direction: [f32; 4],
}

impl GlobalObservation {
    /// Value of `layer` at `pos`; 0 outside the grid.
    pub fn layer_at(&self, layer: usize, pos: Position) -> f32 {
        if pos.row < 0 || pos.col < 0 || pos.row as usize >= self.height || pos.col as usize >= self.width {
            return 0.0;
        }
        let plane = self.height * self.width;
        self.agents_targets[layer * plane + pos.row as usize * self.width + pos.col as usize]
    }
}

/// Builds [`GlobalObservation`]s.  The rail layer is computed once per reset.
#[derive(Clone, Debug, Default)]
pub struct GlobalObsBuilder {
    rail: Vec<f32>,
}

impl GlobalObsBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

fn rail_layer(rail: &TransitionMap) -> Vec<f32> {
    let mut out = Vec::with_capacity(rail.cell_count() * 16);
    for &mask in rail.cells() {
        out.extend((0..16).map(|k| f32::from((mask >> k) & 1)));
    }
    out
}

impl ObservationBuilder for GlobalObsBuilder {
    type Observation = GlobalObservation;

    fn reset(&mut self, ctx: &ObsContext<'_>) {
        self.rail = rail_layer(ctx.rail);
    }

    fn get(&self, agent: AgentId, ctx: &ObsContext<'_>) -> GlobalObservation {
        let (height, width) = (ctx.rail.height, ctx.rail.width);
        let plane = height * width;
        let mut layers = vec![0.0f32; 4 * plane];

        let mut bump = |layer: usize, pos: Position| {
            if let Some(cell) = ctx.rail.cell_index(pos) {
                layers[layer * plane + cell] += 1.0;
            }
        };

        let agents = ctx.agents;
        for other in agents.agent_ids() {
            let i = other.index();
            if other == agent {
                bump(LAYER_OWN_POSITION, agents.position[i]);
                bump(LAYER_OWN_TARGET, agents.target[i]);
            } else {
                bump(LAYER_OTHER_AGENTS, agents.position[i]);
                bump(LAYER_OTHER_TARGETS, agents.target[i]);
            }
        }

        let mut direction = [0.0; 4];
        direction[agents.direction[agent.index()].index()] = 1.0;

        let rail = if self.rail.len() == plane * 16 { self.rail.clone() } else { rail_layer(ctx.rail) };

        GlobalObservation { height, width, rail, agents_targets: layers, direction }
    }
}
