//! The fixed action set shared by policies and the step engine.

/// An action an agent requests for the current tick.
///
/// Policies submit raw integer codes; [`RailAction::from_code`] maps them to
/// this enum and the environment substitutes [`RailAction::DoNothing`] for
/// anything out of range.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RailAction {
    /// Keep doing whatever the agent is doing.  A moving agent keeps moving.
    #[default]
    DoNothing   = 0,
    /// Turn left at the next cell exit; starts a stationary agent.
    MoveLeft    = 1,
    /// Continue straight (or along the only exit); starts a stationary agent.
    MoveForward = 2,
    /// Turn right at the next cell exit; starts a stationary agent.
    MoveRight   = 3,
    /// Halt.  Only honoured exactly at a cell boundary.
    StopMoving  = 4,
}

impl RailAction {
    pub const ALL: [RailAction; 5] = [
        RailAction::DoNothing,
        RailAction::MoveLeft,
        RailAction::MoveForward,
        RailAction::MoveRight,
        RailAction::StopMoving,
    ];

    /// Decode a policy-supplied action code.  `None` for anything outside
    /// `0..=4`.
    pub fn from_code(code: i64) -> Option<RailAction> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    #[inline]
    pub fn code(self) -> i64 {
        self as i64
    }

    /// `true` for the three actions that pick a cell exit.
    #[inline]
    pub fn is_movement(self) -> bool {
        matches!(self, RailAction::MoveLeft | RailAction::MoveForward | RailAction::MoveRight)
    }

    #[inline]
    pub fn is_turn(self) -> bool {
        matches!(self, RailAction::MoveLeft | RailAction::MoveRight)
    }

    /// Single-letter label used in compact action logs.
    pub fn to_char(self) -> char {
        match self {
            RailAction::DoNothing   => 'B',
            RailAction::MoveLeft    => 'L',
            RailAction::MoveForward => 'F',
            RailAction::MoveRight   => 'R',
            RailAction::StopMoving  => 'S',
        }
    }
}

impl std::fmt::Display for RailAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RailAction::DoNothing   => "do-nothing",
            RailAction::MoveLeft    => "move-left",
            RailAction::MoveForward => "move-forward",
            RailAction::MoveRight   => "move-right",
            RailAction::StopMoving  => "stop-moving",
        };
        f.write_str(name)
    }
}
