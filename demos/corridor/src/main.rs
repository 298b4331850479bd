//! corridor — three trains sharing a single line with a passing loop.
//!
//! A 2 × 8 hand-built network:
//!
//! ```text
//!   col:  0   1   2   3   4   5   6   7
//! row 0:          ┌───────────┐
//! row 1:  ╞═══════╧═══════════╧═══════╡
//! ```
//!
//! Train 0 runs east along the main line.  Trains 1 and 2 come west through
//! the loop and rejoin the main line at the left switch; train 2 is half
//! speed so train 1 queues behind it.
//!
//! Each tick every train at a cell boundary picks the legal move with the
//! shortest remaining distance, breaking ties with a seeded RNG.
//!
//! Run with:
//! ```bash
//! cargo run -p corridor --release
//! ```

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use rg_agent::AgentStatic;
use rg_core::Direction::{East as E, North as N, South as S, West as W};
use rg_core::{AgentId, Position, RailAction, Tick};
use rg_env::{EnvObserver, FixedRail, RailEnv, RailEnvBuilder};
use rg_grid::cells::{STRAIGHT_EW, mask_from_pairs};
use rg_grid::{TransitionMap, TransitionMapBuilder};
use rg_motion::check_action;
use rg_obs::{ObservationBuilder, TreeObsBuilder, TreeView};

// ── Constants ─────────────────────────────────────────────────────────────────

const HEIGHT:     usize = 2;
const WIDTH:      usize = 8;
const SEED:       u64   = 42;
const MAX_TICKS:  u64   = 64;
const TREE_DEPTH: usize = 2;

// ── Network ───────────────────────────────────────────────────────────────────

/// Main line on row 1 between two dead ends, loop on row 0 hung off the
/// switches at columns 2 and 5.
fn build_network() -> Result<TransitionMap> {
    let mut b = TransitionMapBuilder::new(HEIGHT, WIDTH);

    // Main line.
    b.set(Position::new(1, 0), mask_from_pairs(&[(W, E)]))?;
    b.set(Position::new(1, 1), STRAIGHT_EW)?;
    b.set(Position::new(1, 2), mask_from_pairs(&[(E, E), (W, W), (E, N), (S, W)]))?;
    b.set_row_run(1, 3..5, STRAIGHT_EW)?;
    b.set(Position::new(1, 5), mask_from_pairs(&[(E, E), (W, W), (W, N), (S, E)]))?;
    b.set(Position::new(1, 6), STRAIGHT_EW)?;
    b.set(Position::new(1, 7), mask_from_pairs(&[(E, W)]))?;

    // Passing loop.
    b.set(Position::new(0, 2), mask_from_pairs(&[(N, E), (W, S)]))?;
    b.set_row_run(0, 3..5, STRAIGHT_EW)?;
    b.set(Position::new(0, 5), mask_from_pairs(&[(E, S), (N, W)]))?;

    Ok(b.build())
}

fn trains() -> Vec<AgentStatic> {
    vec![
        AgentStatic::new(Position::new(1, 1), E, Position::new(1, 6)),
        AgentStatic::new(Position::new(0, 4), W, Position::new(1, 1)),
        AgentStatic::new(Position::new(0, 3), W, Position::new(1, 0)).with_speed(0.5),
    ]
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// Shortest-distance move for every train sitting at a cell boundary.
/// Trains mid-cell, and trains already done, are left out of the map.
fn greedy_actions<O: ObservationBuilder>(
    env: &RailEnv<FixedRail, O>,
    rng: &mut SmallRng,
) -> HashMap<AgentId, i64> {
    let agents = env.agents();
    let mut actions = HashMap::new();

    for agent in env.agent_handles() {
        if env.dones()[agent.index()] || !agents.is_at_boundary(agent) {
            continue;
        }
        let (pos, heading) = (agents.position[agent.index()], agents.direction[agent.index()]);

        let scored: Vec<(RailAction, f32)> = [RailAction::MoveLeft, RailAction::MoveForward, RailAction::MoveRight]
            .into_iter()
            .filter_map(|action| {
                let check = check_action(env.rail(), pos, heading, action);
                check.is_legal().then(|| {
                    (action, env.distances().get(agent, check.new_position, check.new_direction))
                })
            })
            .collect();

        let best = scored.iter().map(|&(_, d)| d).fold(f32::INFINITY, f32::min);
        let ties: Vec<RailAction> = scored
            .iter()
            .filter(|&&(_, d)| d == best)
            .map(|&(a, _)| a)
            .collect();

        let action = ties.choose(rng).copied().unwrap_or(RailAction::StopMoving);
        actions.insert(agent, action.code());
    }
    actions
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints arrivals and keeps a running reward total per train.
struct ProgressObserver {
    totals: Vec<f32>,
    steps:  u64,
}

impl ProgressObserver {
    fn new(agents: usize) -> Self {
        Self { totals: vec![0.0; agents], steps: 0 }
    }
}

impl EnvObserver for ProgressObserver {
    fn on_reset(&mut self, episode: u32) {
        println!("Episode {episode} started");
        self.totals.fill(0.0);
        self.steps = 0;
    }

    fn on_agent_done(&mut self, tick: Tick, agent: AgentId) {
        println!("  {tick}: train {} reached its target", agent.index());
    }

    fn on_step_end(&mut self, _tick: Tick, rewards: &[f32], _dones: &[bool]) {
        for (total, r) in self.totals.iter_mut().zip(rewards) {
            *total += r;
        }
        self.steps += 1;
    }

    fn on_episode_done(&mut self, tick: Tick) {
        println!("  {tick}: all trains home");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== corridor — railgrid passing-loop demo ===");
    println!("Grid: {HEIGHT}×{WIDTH}  |  Seed: {SEED}  |  Tree depth: {TREE_DEPTH}");
    println!();

    // 1. Network and trains.
    let rail = build_network()?;
    println!("Network: {} track cells of {}", rail.rail_cell_count(), rail.cell_count());

    // 2. Environment.
    let generator = FixedRail::new(rail, trains());
    let mut env = RailEnvBuilder::new(HEIGHT, WIDTH, generator, TreeObsBuilder::new(TREE_DEPTH)?).build()?;
    println!("Trains: {}", env.num_agents());
    for agent in env.agent_handles() {
        let s = env.agents().static_of(agent);
        println!(
            "  train {}: {} facing {} → {}  speed {}  (shortest path {} transitions)",
            agent.index(),
            s.start,
            s.start_direction,
            s.target,
            s.speed,
            env.distances().get(agent, s.start, s.start_direction),
        );
    }
    println!();

    let mut obs = ProgressObserver::new(env.num_agents());
    let observations = env.reset_observed(true, true, &mut obs)?;
    println!("Train 0 at reset:");
    print!("{}", TreeView(&observations[0]));

    // 3. Run.
    let mut rng = SmallRng::seed_from_u64(SEED);
    let t0 = Instant::now();
    while !env.all_done() && env.tick().0 < MAX_TICKS {
        let actions = greedy_actions(&env, &mut rng);
        env.step_observed(&actions, &mut obs);
    }
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!();
    println!(
        "{} after {} ticks ({:.3} ms)",
        if env.all_done() { "Finished" } else { "Stopped" },
        obs.steps,
        elapsed.as_secs_f64() * 1e3,
    );
    println!();
    println!("{:<7} {:<10} {:<7} {:<6} {:>8}", "Train", "Cell", "Done", "Gap", "Reward");
    println!("{}", "-".repeat(42));
    for agent in env.agent_handles() {
        let i = agent.index();
        let agents = env.agents();
        println!(
            "{:<7} {:<10} {:<7} {:<6} {:>8.2}",
            i,
            agents.position[i].to_string(),
            if env.dones()[i] { "yes" } else { "no" },
            agents.position[i].manhattan(agents.target[i]),
            obs.totals[i],
        );
    }

    Ok(())
}
