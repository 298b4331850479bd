//! The `RailEnv` struct: reset, step, rewards, and observation dispatch.

use std::collections::HashMap;

use rg_agent::{AgentStatic, AgentStore};
use rg_core::{AgentId, CoreError, EnvConfig, RailAction, Tick};
use rg_grid::{DistanceMap, OccupancyGrid, TransitionMap};
use rg_motion::MotionEngine;
use rg_obs::{ObsContext, ObservationBuilder};

use crate::{EnvError, EnvObserver, EnvResult, GeneratedRail, NoopObserver, RailGenerator};

/// Outcome of one [`RailEnv::step`], indexed by `AgentId`.
#[derive(Clone, Debug)]
pub struct StepResult<T> {
    pub observations: Vec<T>,
    pub rewards:      Vec<f32>,
    /// Per-agent completion.  Once `true` it stays `true` until reset.
    pub dones:        Vec<bool>,
    /// Every agent sits on its target.
    pub all_done:     bool,
}

// ── RailEnv ───────────────────────────────────────────────────────────────────

/// Multi-agent rail environment.
///
/// `RailEnv<G, O>` owns the transition map, the per-agent distance map, all
/// agent state, and the observation builder.  Create via
/// [`RailEnvBuilder`][crate::RailEnvBuilder].
pub struct RailEnv<G: RailGenerator, O: ObservationBuilder> {
    height: usize,
    width:  usize,
    config: EnvConfig,

    generator:   G,
    obs_builder: O,

    rail:      TransitionMap,
    distances: DistanceMap,
    agents:    AgentStore,
    motion:    MotionEngine,
    /// Target count per cell; static for the episode.
    targets:   OccupancyGrid,

    dones:    Vec<bool>,
    all_done: bool,
    tick:     Tick,

    /// Agents requested from the generator on the next reset.
    requested_agents: usize,
    pub(crate) num_resets: u32,
}

impl<G: RailGenerator, O: ObservationBuilder> RailEnv<G, O> {
    pub(crate) fn new(
        height:      usize,
        width:       usize,
        config:      EnvConfig,
        generator:   G,
        obs_builder: O,
        num_agents:  usize,
    ) -> Self {
        Self {
            height,
            width,
            config,
            generator,
            obs_builder,
            rail:             TransitionMap::empty(height, width),
            distances:        DistanceMap::empty(height, width),
            agents:           AgentStore::default(),
            motion:           MotionEngine::new(height, width),
            targets:          OccupancyGrid::new(height, width),
            dones:            Vec::new(),
            all_done:         false,
            tick:             Tick::ZERO,
            requested_agents: num_agents,
            num_resets:       0,
        }
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Start a new episode, regenerating rail and agents as configured by
    /// [`EnvConfig`].  Returns the initial observations.
    pub fn reset(&mut self) -> EnvResult<Vec<O::Observation>> {
        let (regen, replace) = (self.config.regen_rail_on_reset, self.config.replace_agents_on_reset);
        self.reset_observed(regen, replace, &mut NoopObserver)
    }

    /// Start a new episode.  Without `regen_rail` the current map is kept;
    /// without `replace_agents` the current agents restart from their spawns.
    pub fn reset_with(&mut self, regen_rail: bool, replace_agents: bool) -> EnvResult<Vec<O::Observation>> {
        self.reset_observed(regen_rail, replace_agents, &mut NoopObserver)
    }

    /// [`reset_with`](Self::reset_with) reporting to `observer`.
    ///
    /// On error the environment is left exactly as it was.
    pub fn reset_observed<V: EnvObserver>(
        &mut self,
        regen_rail:     bool,
        replace_agents: bool,
        observer:       &mut V,
    ) -> EnvResult<Vec<O::Observation>> {
        let GeneratedRail { rail, agents } =
            self.generator
                .generate(self.height, self.width, self.requested_agents, self.num_resets)?;

        if regen_rail && (rail.height, rail.width) != (self.height, self.width) {
            return Err(EnvError::RailSize {
                expected: (self.height, self.width),
                got:      (rail.height, rail.width),
            });
        }
        if replace_agents && agents.len() != self.requested_agents {
            return Err(EnvError::AgentCountMismatch {
                expected: self.requested_agents,
                got:      agents.len(),
            });
        }

        let rail = regen_rail.then_some(rail);
        let next_rail = rail.as_ref().unwrap_or(&self.rail);
        if replace_agents {
            validate_spawns(next_rail, &agents)?;
        } else {
            validate_spawns(next_rail, &self.agents.statics())?;
        }

        if let Some(rail) = rail {
            self.rail = rail;
        }
        if replace_agents {
            self.agents = AgentStore::from_statics(&agents);
        } else {
            self.agents.restart();
        }
        self.install();
        self.num_resets += 1;
        observer.on_reset(self.num_resets);

        Ok(self.observations())
    }

    /// Add an agent and restart the episode on the current rail.
    pub fn add_agent(&mut self, agent: AgentStatic) -> EnvResult<AgentId> {
        let mut statics = self.agents.statics();
        statics.push(agent);
        validate_spawns(&self.rail, &statics)?;

        let id = self.agents.push(agent);
        self.agents.restart();
        self.requested_agents = self.agents.count;
        self.install();
        Ok(id)
    }

    /// Rebuild all per-episode state around the restarted agent store.
    fn install(&mut self) {
        self.distances = DistanceMap::build(&self.rail, &self.agents.target);
        self.targets =
            OccupancyGrid::from_positions(self.height, self.width, self.agents.target.iter().copied());
        self.motion = MotionEngine::new(self.height, self.width);
        self.motion.rebuild(&self.agents);

        self.dones = vec![false; self.agents.count];
        self.all_done = false;
        self.tick = Tick::ZERO;

        let ctx = ObsContext::new(
            self.tick,
            &self.rail,
            &self.distances,
            &self.agents,
            self.motion.occupancy(),
            &self.targets,
        );
        self.obs_builder.reset(&ctx);

        log::debug!(
            "reset: {}x{} grid, {} rail cells, {} agents, episode {}",
            self.height,
            self.width,
            self.rail.rail_cell_count(),
            self.agents.count,
            self.num_resets + 1,
        );
        for agent in self.agents.agent_ids() {
            let i = agent.index();
            let d = self.distances.get(agent, self.agents.start[i], self.agents.start_direction[i]);
            if d.is_infinite() {
                log::debug!("{agent}: target {} unreachable from its start", self.agents.target[i]);
            } else {
                log::debug!(
                    "{agent}: {d} transitions to target (max distance {})",
                    self.distances.max_distance(agent)
                );
            }
        }
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Advance one tick.  `actions` maps handles to action codes (see
    /// [`RailAction`]); unsupplied agents do nothing and unknown codes are
    /// logged and treated as do-nothing.
    pub fn step(&mut self, actions: &HashMap<AgentId, i64>) -> StepResult<O::Observation> {
        self.step_observed(actions, &mut NoopObserver)
    }

    /// [`step`](Self::step) reporting to `observer`.
    pub fn step_observed<V: EnvObserver>(
        &mut self,
        actions:  &HashMap<AgentId, i64>,
        observer: &mut V,
    ) -> StepResult<O::Observation> {
        let now = self.tick;
        let rewards_cfg = self.config.rewards;
        observer.on_step_start(now);

        // Completed episodes keep paying the global reward.
        if self.all_done {
            let rewards = vec![rewards_cfg.global_reward; self.agents.count];
            observer.on_step_end(now, &rewards, &self.dones);
            return self.result(rewards);
        }

        let ids: Vec<AgentId> = self.agents.agent_ids().collect();
        let mut rewards = vec![0.0f32; ids.len()];
        for &agent in &ids {
            self.agents.remember_previous(agent);
        }

        for &agent in &ids {
            let i = agent.index();
            if self.dones[i] {
                continue;
            }

            let action = match actions.get(&agent) {
                None => RailAction::DoNothing,
                Some(&code) => RailAction::from_code(code).unwrap_or_else(|| {
                    log::warn!("{agent}: illegal action code {code}, doing nothing instead");
                    RailAction::DoNothing
                }),
            };

            let report = self.motion.advance(&self.rail, &mut self.agents, agent, action);
            let reward = &mut rewards[i];
            if report.started {
                *reward += rewards_cfg.start_penalty;
            }
            if report.forced_stop {
                *reward += rewards_cfg.invalid_action_penalty;
            }
            if report.stopped {
                *reward += rewards_cfg.stop_penalty;
            }
            if report.forced_stop {
                continue;
            }

            if self.agents.is_at_target(agent) {
                self.dones[i] = true;
                observer.on_agent_done(now, agent);
            } else {
                *reward += rewards_cfg.step_penalty * self.agents.speed[i];
            }
        }

        if self.agents.all_at_target() {
            self.all_done = true;
            rewards.fill(rewards_cfg.global_reward);
            log::debug!("episode {} complete at {now}", self.num_resets);
            observer.on_episode_done(now);
        }

        self.tick = now + 1;
        observer.on_step_end(now, &rewards, &self.dones);
        self.result(rewards)
    }

    fn result(&self, rewards: Vec<f32>) -> StepResult<O::Observation> {
        StepResult {
            observations: self.observations(),
            rewards,
            dones: self.dones.clone(),
            all_done: self.all_done,
        }
    }

    // ── Observations ──────────────────────────────────────────────────────

    fn context(&self) -> ObsContext<'_> {
        ObsContext::new(
            self.tick,
            &self.rail,
            &self.distances,
            &self.agents,
            self.motion.occupancy(),
            &self.targets,
        )
    }

    /// Current observations for every agent.
    pub fn observations(&self) -> Vec<O::Observation> {
        let ids: Vec<AgentId> = self.agents.agent_ids().collect();
        self.obs_builder.get_many(&ids, &self.context())
    }

    /// Current observation for one agent.
    pub fn observation(&self, agent: AgentId) -> EnvResult<O::Observation> {
        if agent.index() >= self.agents.count {
            return Err(CoreError::AgentNotFound(agent).into());
        }
        Ok(self.obs_builder.get(agent, &self.context()))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn rail(&self) -> &TransitionMap {
        &self.rail
    }

    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn dones(&self) -> &[bool] {
        &self.dones
    }

    pub fn all_done(&self) -> bool {
        self.all_done
    }

    /// Ticks stepped in the current episode.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Resets since the environment was built.
    pub fn num_resets(&self) -> u32 {
        self.num_resets
    }

    pub fn num_agents(&self) -> usize {
        self.agents.count
    }

    pub fn agent_handles(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.agent_ids()
    }

    pub fn observation_builder(&self) -> &O {
        &self.obs_builder
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}

// ── Spawn validation ──────────────────────────────────────────────────────────

fn validate_spawns(rail: &TransitionMap, statics: &[AgentStatic]) -> EnvResult<()> {
    for (i, s) in statics.iter().enumerate() {
        let agent = AgentId(i as u32);
        if !rail.is_valid_cell(s.start) {
            return Err(EnvError::InvalidStart { agent, position: s.start });
        }
        if !rail.contains(s.target) {
            return Err(EnvError::InvalidTarget { agent, position: s.target });
        }
        if !s.has_valid_speed() {
            return Err(EnvError::InvalidSpeed { agent, speed: s.speed });
        }
    }
    Ok(())
}
