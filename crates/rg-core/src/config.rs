//! Environment configuration.
//!
//! Typically built in code by the application crate (or deserialized with
//! the `serde` feature) and passed to the environment builder.

use crate::{CoreError, CoreResult};

/// Reward shaping constants applied by the step engine.
///
/// The defaults reproduce the reference environment: every tick an
/// unfinished agent pays `step_penalty * speed`, and once every agent sits
/// on its target each agent receives `global_reward` instead.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    /// Per-tick penalty for an unfinished agent, scaled by its speed so the
    /// penalty per traversed cell is speed-independent.
    pub step_penalty: f32,

    /// Flat reward given to every agent on the tick the episode completes
    /// (and on every step taken after completion).
    pub global_reward: f32,

    /// Added when a moving agent halts, voluntarily or forced.
    pub stop_penalty: f32,

    /// Added when a stationary agent starts moving.
    pub start_penalty: f32,

    /// Added when a requested movement is illegal and the agent is stopped.
    pub invalid_action_penalty: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step_penalty:           -1.0,
            global_reward:          1.0,
            stop_penalty:           0.0,
            start_penalty:          0.0,
            invalid_action_penalty: 0.0,
        }
    }
}

impl RewardConfig {
    /// Reject non-finite constants; they would poison every reward sum.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("step_penalty", self.step_penalty),
            ("global_reward", self.global_reward),
            ("stop_penalty", self.stop_penalty),
            ("start_penalty", self.start_penalty),
            ("invalid_action_penalty", self.invalid_action_penalty),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CoreError::InvalidConfig(format!("{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }
}

/// Top-level environment configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    pub rewards: RewardConfig,

    /// Whether a plain `reset()` asks the generator for a new rail.
    pub regen_rail_on_reset: bool,

    /// Whether a plain `reset()` asks the generator for new agent spawns.
    pub replace_agents_on_reset: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            rewards:                 RewardConfig::default(),
            regen_rail_on_reset:     true,
            replace_agents_on_reset: true,
        }
    }
}

impl EnvConfig {
    pub fn validate(&self) -> CoreResult<()> {
        self.rewards.validate()
    }
}
