//! Movement resolver: where can a piece go with these dice?
//!
//! Pure function of the route and a piece's position. It never errors;
//! an illegal request simply has no destination.
//!
//! - `Home` leaves only on a double pair, landing `min(die, L-1)` cells past
//!   the start. A single die never moves a home piece.
//! - `OnRoute` advances by the die (or, for a pair, by the sum) as long as
//!   the move does not overshoot the goal. No bounce-back, no partial move.
//! - `Goal` never moves.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::board::{Cell, Route};
use crate::core::{DiceRoll, PlayerId, Position, DIE_FACES};

/// Dice offered to the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceInput {
    /// One die, as used in the Moving phase.
    Single(u8),
    /// Both dice. Needed to leave home.
    Pair(DiceRoll),
}

/// A reachable cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Absolute route index.
    pub index: usize,
    pub cell: Cell,
}

/// Zero or one destinations.
pub type Destinations = SmallVec<[Destination; 1]>;

/// Legal destinations for a piece of `player` at `position`.
#[must_use]
pub fn destinations(route: &Route, player: PlayerId, position: Position, dice: DiceInput) -> Destinations {
    let index = match (position, dice) {
        (Position::Goal, _) => None,
        (Position::Home, DiceInput::Pair(roll)) if roll.is_valid() && roll.is_double() => {
            Some(entry_index(route, player, roll.d1))
        }
        (Position::Home, _) => None,
        (Position::OnRoute(from), DiceInput::Single(value)) if is_face(value) => {
            advance(route, player, from, usize::from(value))
        }
        (Position::OnRoute(from), DiceInput::Pair(roll)) if roll.is_valid() => {
            advance(route, player, from, usize::from(roll.sum()))
        }
        (Position::OnRoute(_), _) => None,
    };

    match index {
        Some(index) => smallvec![Destination {
            index,
            cell: route.cell(index),
        }],
        None => SmallVec::new(),
    }
}

/// Where a home piece lands when it enters on a double of `value`.
#[must_use]
pub fn entry_index(route: &Route, player: PlayerId, value: u8) -> usize {
    let steps = usize::from(value).min(route.len() - 1);
    route.absolute_index(player, steps)
}

/// Step `steps` cells from `from`, or `None` if that overshoots the goal.
#[must_use]
pub fn advance(route: &Route, player: PlayerId, from: usize, steps: usize) -> Option<usize> {
    let relative = route.relative_position(player, from);
    if relative + steps > route.len() - 1 {
        return None;
    }
    Some((from + steps) % route.len())
}

fn is_face(value: u8) -> bool {
    (1..=DIE_FACES).contains(&value)
}
