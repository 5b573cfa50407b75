//! Rule violations.
//!
//! These are refusals, not faults: the state is left untouched and the
//! caller may try something else.

use thiserror::Error;

use crate::core::{DiceRoll, PieceId, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("the game is over")]
    GameOver,
    #[error("it is {current}'s turn, not {player}'s")]
    NotYourTurn { player: PlayerId, current: PlayerId },
    #[error("{piece} does not belong to {player}")]
    NotYourPiece { piece: PieceId, player: PlayerId },
    #[error("no such piece: {0}")]
    UnknownPiece(PieceId),
    #[error("cannot roll now: moves are pending or no attempts are left")]
    DiceNotReady,
    #[error("no pending dice to move with")]
    NoPendingDice,
    #[error("dice out of range: {0}")]
    InvalidDice(DiceRoll),
    #[error("{piece} has no pending die that reaches {destination}")]
    IllegalMove { piece: PieceId, destination: usize },
}
