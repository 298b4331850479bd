//! Environment observer trait for progress reporting and data collection.

use rg_core::{AgentId, Tick};

/// Callbacks invoked by the environment during resets and steps.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl EnvObserver for Progress {
///     fn on_agent_done(&mut self, tick: Tick, agent: AgentId) {
///         println!("{tick}: {agent} arrived");
///     }
/// }
/// ```
pub trait EnvObserver {
    /// Called after a successful reset.  `episode` is the reset counter.
    fn on_reset(&mut self, _episode: u32) {}

    /// Called at the start of every step, before any agent moves.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called when an agent reaches its target.
    fn on_agent_done(&mut self, _tick: Tick, _agent: AgentId) {}

    /// Called at the end of every step with the per-agent results.
    fn on_step_end(&mut self, _tick: Tick, _rewards: &[f32], _dones: &[bool]) {}

    /// Called once, on the step in which the last agent arrives.
    fn on_episode_done(&mut self, _tick: Tick) {}
}

/// An [`EnvObserver`] that does nothing.
pub struct NoopObserver;

impl EnvObserver for NoopObserver {}
