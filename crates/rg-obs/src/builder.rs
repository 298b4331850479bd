//! The `ObservationBuilder` trait, the extension point for what agents see.

use rg_core::AgentId;

use crate::ObsContext;

/// Pluggable per-agent observation.
///
/// The environment calls [`reset`](Self::reset) after every episode reset
/// (the rail and distance map may have changed) and then
/// [`get_many`](Self::get_many) after every reset and step.
///
/// # Thread safety
///
/// With the `parallel` feature `get_many` calls `get` for many agents at
/// once, so implementations must be `Send + Sync` and `get` must not mutate
/// the builder.  Anything that depends only on the episode belongs in
/// `reset`.
///
/// # Example
///
/// ```rust,ignore
/// struct Heading;
///
/// impl ObservationBuilder for Heading {
///     type Observation = Direction;
///
///     fn get(&self, agent: AgentId, ctx: &ObsContext<'_>) -> Direction {
///         ctx.agents.direction[agent.index()]
///     }
/// }
/// ```
pub trait ObservationBuilder: Send + Sync {
    type Observation: Clone + Send;

    /// Precompute episode-level data.  Default: nothing to do.
    fn reset(&mut self, _ctx: &ObsContext<'_>) {}

    /// Observation for a single agent.
    fn get(&self, agent: AgentId, ctx: &ObsContext<'_>) -> Self::Observation;

    /// Observations for `agents`, in the same order.
    fn get_many(&self, agents: &[AgentId], ctx: &ObsContext<'_>) -> Vec<Self::Observation> {
        #[cfg(not(feature = "parallel"))]
        {
            agents.iter().map(|&agent| self.get(agent, ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            agents.par_iter().map(|&agent| self.get(agent, ctx)).collect()
        }
    }
}
