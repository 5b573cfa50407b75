//! Player actions and action history.
//!
//! A turn is driven by two kinds of input:
//! - `Roll`: throw the dice for the current player
//! - `Move`: commit one pending die to one piece, naming its destination
//!
//! Records of rolls keep the dice thrown so a history replays
//! deterministically without the RNG.

use serde::{Deserialize, Serialize};

use super::piece::PieceId;
use super::player::PlayerId;
use super::rng::DiceRoll;

/// A game action.
///
/// ## Example
///
/// ```
/// use parques_engine::core::{Action, PieceId, PlayerId};
///
/// let roll = Action::Roll;
/// let step = Action::Move {
///     piece: PieceId::new(PlayerId::new(0), 1),
///     destination: 9,
/// };
/// assert!(roll.is_roll());
/// assert!(!step.is_roll());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Throw the dice for the current player.
    Roll,
    /// Move a piece to an absolute route index using one pending die.
    Move { piece: PieceId, destination: usize },
}

impl Action {
    #[must_use]
    pub fn is_roll(&self) -> bool {
        matches!(self, Action::Roll)
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Deterministic replay
/// - Debugging a presentation layer's call sequence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Dice thrown, for rolls.
    pub dice: Option<DiceRoll>,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(
        player: PlayerId,
        action: Action,
        dice: Option<DiceRoll>,
        turn: u32,
        sequence: u32,
    ) -> Self {
        Self {
            player,
            action,
            dice,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_record() {
        let action = Action::Move {
            piece: PieceId::new(PlayerId::new(2), 0),
            destination: 23,
        };
        let record = ActionRecord::new(PlayerId::new(2), action, None, 5, 1);

        assert_eq!(record.player, PlayerId::new(2));
        assert_eq!(record.action, action);
        assert_eq!(record.dice, None);
        assert_eq!(record.turn, 5);
        assert_eq!(record.sequence, 1);
    }

    #[test]
    fn test_roll_record_keeps_dice() {
        let record = ActionRecord::new(
            PlayerId::new(0),
            Action::Roll,
            Some(DiceRoll::new(6, 1)),
            1,
            0,
        );
        assert!(record.action.is_roll());
        assert_eq!(record.dice, Some(DiceRoll::new(6, 1)));
    }

    #[test]
    fn test_action_serde() {
        let actions = [
            Action::Roll,
            Action::Move {
                piece: PieceId::new(PlayerId::new(1), 3),
                destination: 17,
            },
        ];

        for action in actions {
            let json = serde_json::to_string(&action).unwrap();
            let back: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(back, action);
        }
    }
}
