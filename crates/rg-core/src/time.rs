//! Episode time model.
//!
//! Time is a monotonically increasing `Tick` counter that restarts at zero on
//! every environment reset.  There is no mapping to wall-clock time: one tick
//! is one call to `step`, and episode-length limits belong to the caller.

use std::fmt;

/// Number of steps taken since the last reset.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

/// The tick `rhs` steps after `self`.
impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
