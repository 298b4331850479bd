//! Agent handles.
//!
//! A handle is the agent's position in every per-agent array, so it is kept
//! as a plain `u32` newtype that is `Copy + Ord + Hash` and cheap to use as a
//! map key.

use std::fmt;

/// Handle of an agent (train).  Doubles as the index into every SoA array in
/// the agent store and fixes the agent's priority within a tick: lower
/// handles are resolved first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Handle that never names a live agent.
    pub const INVALID: AgentId = AgentId(u32::MAX);

    /// Index into the agent arrays.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for AgentId {
    /// Unassigned handles read as [`AgentId::INVALID`].
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}
