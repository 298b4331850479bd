//! Action legality against the transition map.

use rg_core::{Direction, Position, RailAction};
use rg_grid::TransitionMap;
use rg_grid::cells::exit_directions;

/// Outcome of validating one movement action from `(pos, heading)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveCheck {
    /// Cell the agent would enter.
    pub new_position: Position,
    /// Heading after entering it.
    pub new_direction: Direction,
    /// The cell's transitions allow leaving toward `new_direction`.
    pub transition_valid: bool,
    /// `new_position` is inside the grid and carries track.
    pub cell_valid: bool,
}

impl MoveCheck {
    #[inline]
    pub fn is_legal(&self) -> bool {
        self.transition_valid && self.cell_valid
    }
}

/// Where `action` would take an agent in `pos` facing `heading`.
///
/// - Left / right turn the heading a quarter; they are never legal where
///   fewer than two exits exist.
/// - Forward on a single-exit cell (curve, straight, dead end) follows that
///   exit whatever its direction.  With several exits it must go straight.
/// - `DoNothing` and `StopMoving` are checked as going straight on.
///
/// Occupancy is not considered here.
pub fn check_action(rail: &TransitionMap, pos: Position, heading: Direction, action: RailAction) -> MoveCheck {
    let exits = rail.exits(pos, heading);
    let num_exits = exits.count_ones();
    let allows = |d: Direction| exits & (1 << d.index()) != 0;

    let (new_direction, transition_valid) = match action {
        RailAction::MoveLeft => {
            let d = heading.turn_left();
            (d, num_exits > 1 && allows(d))
        }
        RailAction::MoveRight => {
            let d = heading.turn_right();
            (d, num_exits > 1 && allows(d))
        }
        _ if num_exits == 1 => {
            // `exits` has exactly one bit set.
            let d = exit_directions(exits).next().unwrap_or(heading);
            (d, true)
        }
        _ => (heading, allows(heading)),
    };

    let new_position = pos.step(new_direction);
    MoveCheck {
        new_position,
        new_direction,
        transition_valid,
        cell_valid: rail.is_valid_cell(new_position),
    }
}
