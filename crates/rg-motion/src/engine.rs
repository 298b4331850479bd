//! The per-agent movement step: action gating, fractional progress, and
//! occupancy-checked cell commits.

use rg_agent::AgentStore;
use rg_core::{AgentId, Position, RailAction};
use rg_grid::{OccupancyGrid, TransitionMap};

use crate::check_action;

/// Tolerance when comparing the accumulated fraction against 1, so that
/// speeds such as 1/3 still commit after exactly three ticks.
const FRACTION_EPSILON: f32 = 1e-5;

/// What happened to one agent during [`MotionEngine::advance`].
///
/// The environment turns these flags into reward terms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MotionReport {
    /// A stationary agent was set in motion.
    pub started: bool,
    /// A moving agent halted, voluntarily or forced.
    pub stopped: bool,
    /// The requested movement was illegal at the boundary.  The agent's tick
    /// ends here: no completion check, no step penalty.
    pub forced_stop: bool,
    /// The agent reached the end of its cell but the destination was taken.
    pub blocked: bool,
    /// `(from, to)` when the agent entered a new cell.
    pub moved: Option<(Position, Position)>,
}

/// Owns the live occupancy grid and applies movement to an [`AgentStore`].
pub struct MotionEngine {
    occupancy: OccupancyGrid,
}

impl MotionEngine {
    pub fn new(height: usize, width: usize) -> Self {
        Self { occupancy: OccupancyGrid::new(height, width) }
    }

    /// Re-seed occupancy from current agent positions.  Call after every
    /// reset and whenever positions are edited outside [`advance`](Self::advance).
    pub fn rebuild(&mut self, agents: &AgentStore) {
        self.occupancy.clear();
        for &pos in &agents.position {
            self.occupancy.add(pos);
        }
    }

    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    /// Apply `action` to `agent` for one tick.
    ///
    /// `action` must already be sanitised (unsupplied or unknown codes mapped
    /// to [`RailAction::DoNothing`]).  Agents already done must not be passed.
    pub fn advance(
        &mut self,
        rail:   &TransitionMap,
        agents: &mut AgentStore,
        agent:  AgentId,
        action: RailAction,
    ) -> MotionReport {
        let i = agent.index();
        let mut report = MotionReport::default();

        // Keep rolling unless told otherwise.
        let action = if action == RailAction::DoNothing && agents.moving[i] {
            RailAction::MoveForward
        } else {
            action
        };

        // Halting is only possible on entering a cell.
        if action == RailAction::StopMoving && agents.moving[i] && agents.is_at_boundary(agent) {
            agents.moving[i] = false;
            report.stopped = true;
        }

        if !agents.moving[i] && action.is_movement() {
            agents.moving[i] = true;
            report.started = true;
        }

        // ── Choose the exit at the boundary ───────────────────────────────
        let mut selected = false;
        if agents.is_at_boundary(agent) && action.is_movement() {
            let (pos, heading) = (agents.position[i], agents.direction[i]);
            let mut chosen = action;
            let mut legal = check_action(rail, pos, heading, action).is_legal();

            if !legal && action.is_turn() && agents.moving[i] {
                chosen = RailAction::MoveForward;
                legal = check_action(rail, pos, heading, chosen).is_legal();
            }

            if !legal {
                agents.moving[i] = false;
                report.stopped = true;
                report.forced_stop = true;
                log::trace!("{agent}: {action} illegal at {pos} facing {heading}; forced stop");
                return report;
            }

            agents.exit_action[i] = Some(chosen);
            selected = true;
        }

        // ── Progress through the cell ─────────────────────────────────────
        if agents.moving[i] && (selected || agents.position_fraction[i] > 0.0) {
            let f = agents.position_fraction[i] + agents.speed[i];
            agents.position_fraction[i] = if f >= 1.0 - FRACTION_EPSILON { 1.0 } else { f };
        }

        if agents.position_fraction[i] >= 1.0 {
            self.commit(rail, agents, agent, &mut report);
        }

        report
    }

    /// Try to enter the next cell via the pending exit action.
    fn commit(&mut self, rail: &TransitionMap, agents: &mut AgentStore, agent: AgentId, report: &mut MotionReport) {
        let i = agent.index();
        let from = agents.position[i];
        let Some(exit) = agents.exit_action[i] else {
            report.blocked = true;
            return;
        };

        let check = check_action(rail, from, agents.direction[i], exit);
        if check.is_legal() && self.occupancy.is_free(check.new_position) {
            self.occupancy.move_from_to(from, check.new_position);
            agents.position[i] = check.new_position;
            agents.direction[i] = check.new_direction;
            agents.position_fraction[i] = 0.0;
            report.moved = Some((from, check.new_position));
            log::trace!("{agent}: {from} -> {} facing {}", check.new_position, check.new_direction);
        } else {
            report.blocked = true;
            log::trace!("{agent}: blocked at {from} waiting for {}", check.new_position);
        }
    }
}
