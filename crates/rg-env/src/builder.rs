//! Fluent builder for constructing a [`RailEnv`].

use rg_core::EnvConfig;
use rg_obs::ObservationBuilder;

use crate::{EnvResult, RailEnv, RailGenerator};

/// Fluent builder for [`RailEnv<G, O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                          |
/// |--------------------|--------------------------------------------------|
/// | `.config(c)`       | `EnvConfig::default()`                           |
/// | `.num_agents(n)`   | The generator's agent hint, else 1               |
///
/// # Example
///
/// ```rust,ignore
/// let env = RailEnvBuilder::new(20, 20, my_generator, TreeObsBuilder::new(2)?)
///     .num_agents(4)
///     .build()?;
/// ```
pub struct RailEnvBuilder<G: RailGenerator, O: ObservationBuilder> {
    height:      usize,
    width:       usize,
    generator:   G,
    obs_builder: O,
    config:      EnvConfig,
    num_agents:  Option<usize>,
}

impl<G: RailGenerator, O: ObservationBuilder> RailEnvBuilder<G, O> {
    pub fn new(height: usize, width: usize, generator: G, obs_builder: O) -> Self {
        Self {
            height,
            width,
            generator,
            obs_builder,
            config:     EnvConfig::default(),
            num_agents: None,
        }
    }

    pub fn config(mut self, config: EnvConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of agents requested from the generator on every reset.
    pub fn num_agents(mut self, n: usize) -> Self {
        self.num_agents = Some(n);
        self
    }

    /// Validate the configuration and run the first reset.
    ///
    /// The episode counter is 0 afterwards, so the first explicit
    /// [`RailEnv::reset`] starts episode 1.
    pub fn build(self) -> EnvResult<RailEnv<G, O>> {
        self.config.validate()?;
        let num_agents = self
            .num_agents
            .or_else(|| self.generator.agent_hint())
            .unwrap_or(1);

        let mut env = RailEnv::new(
            self.height,
            self.width,
            self.config,
            self.generator,
            self.obs_builder,
            num_agents,
        );
        env.reset_with(true, true)?;
        env.num_resets = 0;
        Ok(env)
    }
}
