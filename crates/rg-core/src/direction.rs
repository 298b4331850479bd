//! Compass headings.
//!
//! Directions are encoded 0–3 clockwise from north.  The encoding is part of
//! the transition-mask layout (bit `entry * 4 + exit`), so the discriminants
//! must never change.

/// One of the four compass headings an agent can face or move toward.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    #[default]
    North = 0,
    East  = 1,
    South = 2,
    West  = 3,
}

impl Direction {
    /// All headings in encoding order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Heading for encoding `i`, taken modulo 4.
    #[inline]
    pub fn from_index(i: usize) -> Direction {
        Self::ALL[i % 4]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotate by `quarter_turns` (positive = clockwise).
    #[inline]
    pub fn rotate(self, quarter_turns: i32) -> Direction {
        Self::ALL[(self as i32 + quarter_turns).rem_euclid(4) as usize]
    }

    #[inline]
    pub fn turn_left(self) -> Direction {
        self.rotate(-1)
    }

    #[inline]
    pub fn turn_right(self) -> Direction {
        self.rotate(1)
    }

    /// The opposite heading (180° turn).
    #[inline]
    pub fn reverse(self) -> Direction {
        self.rotate(2)
    }

    /// Headings relative to `self` in observation order: left, forward,
    /// right, back.
    #[inline]
    pub fn relative_branches(self) -> [Direction; 4] {
        [self.rotate(-1), self, self.rotate(1), self.rotate(2)]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::East  => "E",
            Direction::South => "S",
            Direction::West  => "W",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
