//! Tree observation builder.
//!
//! # Algorithm
//!
//! From the agent's cell, each of the four branch headings (left, forward,
//! right, back relative to its current heading) that is a legal exit starts
//! a *branch walk*.  The walk follows the corridor cell by cell while the
//! cell has exactly one exit, recording whether another agent or another
//! agent's target was seen on the way.  It ends at:
//!
//! | Stop cell            | Node distance          | Children                     |
//! |----------------------|------------------------|------------------------------|
//! | own target           | 0                      | none                         |
//! | dead end             | distance map           | reversed branch headings     |
//! | switch (≥ 2 exits)   | distance map           | one per legal exit           |
//! | no exits / off grid  | distance map (often ∞) | none                         |
//!
//! Absent children are padded with −∞ subtrees so the output shape depends
//! only on `max_depth`.  A corridor with no switch at all (a closed loop)
//! would never stop, so walks are capped at `height * width * 4` steps and
//! then end as a childless node.

use rg_core::{AgentId, Direction, Position};
use rg_grid::cells::exit_directions;

use crate::node::subtree_nodes;
use crate::{NodeFeatures, ObsContext, ObsError, ObsResult, ObservationBuilder, observation_len};

/// Hard ceiling on `max_depth`; a depth-8 tree already has 87 381 nodes.
pub const MAX_TREE_DEPTH: usize = 8;

/// Builds the branch tree observation for each agent.
#[derive(Clone, Debug)]
pub struct TreeObsBuilder {
    max_depth: usize,
}

impl TreeObsBuilder {
    pub fn new(max_depth: usize) -> ObsResult<Self> {
        if max_depth > MAX_TREE_DEPTH {
            return Err(ObsError::DepthTooLarge { requested: max_depth, max: MAX_TREE_DEPTH });
        }
        Ok(Self { max_depth })
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Length of every observation this builder produces.
    pub fn observation_len(&self) -> usize {
        observation_len(self.max_depth)
    }
}

impl ObservationBuilder for TreeObsBuilder {
    type Observation = Vec<f32>;

    fn get(&self, agent: AgentId, ctx: &ObsContext<'_>) -> Vec<f32> {
        let i = agent.index();
        let explorer = Explorer {
            ctx,
            agent,
            position:  ctx.agents.position[i],
            target:    ctx.agents.target[i],
            max_depth: self.max_depth,
            walk_cap:  ctx.rail.cell_count() * 4,
        };

        let mut out = Vec::with_capacity(self.observation_len());
        explorer.root(&mut out);
        out
    }
}

// ── Branch walking ────────────────────────────────────────────────────────────

/// Why a branch walk stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Stop {
    Target,
    DeadEnd,
    Switch,
    Terminal,
}

struct Explorer<'c, 'a> {
    ctx:       &'c ObsContext<'a>,
    agent:     AgentId,
    position:  Position,
    target:    Position,
    max_depth: usize,
    walk_cap:  usize,
}

#[inline]
fn has_exit(exits: u8, d: Direction) -> bool {
    exits & (1 << d.index()) != 0
}

impl Explorer<'_, '_> {
    fn pad(&self, out: &mut Vec<f32>, levels: usize) {
        for _ in 0..subtree_nodes(levels) {
            out.extend_from_slice(&NodeFeatures::PADDING.to_array());
        }
    }

    fn root(&self, out: &mut Vec<f32>) {
        let heading = self.ctx.agents.direction[self.agent.index()];
        let dist = self.ctx.distances.get(self.agent, self.position, heading);
        out.extend_from_slice(&[0.0, 0.0, 0.0, 0.0, dist]);

        let exits = self.ctx.rail.exits(self.position, heading);
        for branch in heading.relative_branches() {
            if has_exit(exits, branch) {
                self.branch(self.position.step(branch), branch, 1, out);
            } else {
                self.pad(out, self.max_depth);
            }
        }
    }

    /// Walk from `pos` (entered facing `heading`) to the next node and emit
    /// that node's subtree.  `depth` is the node's depth, 1 for the root's
    /// children.
    fn branch(&self, mut pos: Position, mut heading: Direction, depth: usize, out: &mut Vec<f32>) {
        if depth > self.max_depth {
            return;
        }
        let rail = self.ctx.rail;

        let mut other_agent = false;
        let mut other_target = false;
        let mut steps = 0;

        let stop = loop {
            other_agent |= self.ctx.agent_cells.occupied_by_others(pos, self.position);
            other_target |= self.ctx.target_cells.occupied_by_others(pos, self.target);

            if pos == self.target {
                break Stop::Target;
            }

            let exits = rail.exits(pos, heading);
            match exits.count_ones() {
                0 => break Stop::Terminal,
                1 if rail.is_dead_end(pos) => break Stop::DeadEnd,
                1 => {
                    steps += 1;
                    if steps > self.walk_cap {
                        break Stop::Terminal;
                    }
                    let Some(next) = exit_directions(exits).next() else {
                        break Stop::Terminal;
                    };
                    pos = pos.step(next);
                    heading = next;
                }
                _ => break Stop::Switch,
            }
        };

        let distance = match stop {
            Stop::Target => 0.0,
            _ => self.ctx.distances.get(self.agent, pos, heading),
        };
        out.extend_from_slice(&NodeFeatures::new(other_target, other_agent, distance).to_array());

        if depth == self.max_depth {
            return;
        }

        let exits = rail.exits(pos, heading);
        let levels = self.max_depth - depth;
        for branch in heading.relative_branches() {
            match stop {
                // Going "forward" out of a dead end takes the agent back.
                Stop::DeadEnd if has_exit(exits, branch.reverse()) => {
                    let back = branch.reverse();
                    self.branch(pos.step(back), back, depth + 1, out);
                }
                Stop::Switch if has_exit(exits, branch) => {
                    self.branch(pos.step(branch), branch, depth + 1, out);
                }
                _ => self.pad(out, levels),
            }
        }
    }
}
