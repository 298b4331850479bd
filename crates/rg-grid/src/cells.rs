//! Transition-mask encoding helpers and common track pieces.
//!
//! Bit `entry * 4 + exit` of a cell mask is set iff an agent facing `entry`
//! (i.e. having moved in direction `entry` to get here) may leave the cell
//! moving in direction `exit`.  The low nibble therefore holds the exits for
//! a northbound agent, the next nibble for an eastbound one, and so on.
//!
//! All presets are given in one canonical orientation; use
//! [`rotate_mask`] or [`RailCell::rotated`] for the other three.

use rg_core::Direction::{self, East as E, North as N, South as S, West as W};

/// Single-bit mask for the `(entry, exit)` transition.
#[inline]
pub const fn transition_bit(entry: Direction, exit: Direction) -> u16 {
    1 << ((entry as u16) * 4 + exit as u16)
}

/// No track.
pub const EMPTY: u16 = 0;

/// Straight track running north–south.
pub const STRAIGHT_NS: u16 = transition_bit(N, N) | transition_bit(S, S);

/// Straight track running east–west.
pub const STRAIGHT_EW: u16 = transition_bit(E, E) | transition_bit(W, W);

/// Buffer stop whose only open side is south.  A northbound agent entering
/// it turns around and leaves southbound.
pub const DEAD_END_SOUTH: u16 = transition_bit(N, S);

/// Curve connecting the south and east sides.
pub const CURVE_SOUTH_EAST: u16 = transition_bit(N, E) | transition_bit(W, S);

/// North–south straight with a branch off to the east for northbound traffic.
pub const SWITCH_NS_EAST: u16 = STRAIGHT_NS | transition_bit(N, E) | transition_bit(W, S);

/// Diamond crossing: straight through in both axes, no turns.
pub const CROSSING: u16 = STRAIGHT_NS | STRAIGHT_EW;

/// Build a mask from explicit `(entry, exit)` pairs.
pub fn mask_from_pairs(pairs: &[(Direction, Direction)]) -> u16 {
    pairs
        .iter()
        .fold(EMPTY, |mask, &(entry, exit)| mask | transition_bit(entry, exit))
}

/// Rotate every transition in `mask` by `quarter_turns` (positive =
/// clockwise).  Rotating the whole grid clockwise requires rotating every
/// cell mask by one quarter turn.
pub fn rotate_mask(mask: u16, quarter_turns: i32) -> u16 {
    let mut out = EMPTY;
    for entry in Direction::ALL {
        for exit in Direction::ALL {
            if mask & transition_bit(entry, exit) != 0 {
                out |= transition_bit(entry.rotate(quarter_turns), exit.rotate(quarter_turns));
            }
        }
    }
    out
}

/// Iterator over the headings present in a 4-bit exit mask, in encoding
/// order.
#[inline]
pub fn exit_directions(exits: u8) -> impl Iterator<Item = Direction> {
    Direction::ALL
        .into_iter()
        .filter(move |d| exits & (1 << d.index()) != 0)
}

/// Catalogue of track pieces for hand-built maps and tests.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RailCell {
    Empty,
    /// Straight, north–south at rotation 0.
    Straight,
    /// Dead end open to the south at rotation 0.
    DeadEnd,
    /// Curve south↔east at rotation 0.
    Curve,
    /// North–south straight with an east branch at rotation 0.
    Switch,
    Crossing,
}

impl RailCell {
    /// Mask in canonical orientation.
    pub fn mask(self) -> u16 {
        match self {
            RailCell::Empty    => EMPTY,
            RailCell::Straight => STRAIGHT_NS,
            RailCell::DeadEnd  => DEAD_END_SOUTH,
            RailCell::Curve    => CURVE_SOUTH_EAST,
            RailCell::Switch   => SWITCH_NS_EAST,
            RailCell::Crossing => CROSSING,
        }
    }

    /// Mask rotated clockwise by `quarter_turns`.
    pub fn rotated(self, quarter_turns: i32) -> u16 {
        rotate_mask(self.mask(), quarter_turns)
    }
}
