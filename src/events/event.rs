//! Game events.
//!
//! Every engine call returns the events it produced, in order. A
//! presentation layer replays them to animate pieces, play sounds or update
//! counters; the engine never calls back into it.

use serde::{Deserialize, Serialize};

use crate::core::{DiceRoll, Phase, PieceId, PlayerId};

/// Why a player gets another roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusReason {
    /// Entered pieces from home with doubles.
    Entered,
    /// Used both dice of a double.
    Doubles,
    /// Last move captured an opposing piece.
    Capture,
}

/// Something that happened during a roll or a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DiceRolled {
        player: PlayerId,
        dice: DiceRoll,
    },
    /// A piece left home onto the route.
    PieceEntered {
        piece: PieceId,
        to: usize,
    },
    PieceMoved {
        piece: PieceId,
        from: usize,
        to: usize,
    },
    /// An opposing piece was sent home.
    PieceCaptured {
        piece: PieceId,
        by: PieceId,
        at: usize,
    },
    ReachedGoal {
        piece: PieceId,
    },
    /// Consecutive-doubles penalty. `piece` is the one sent to goal, if the
    /// player had any piece on the route.
    DoublesPenalty {
        player: PlayerId,
        piece: Option<PieceId>,
    },
    /// Rolled dice (or remaining dice) had no legal use.
    MovesForfeited {
        player: PlayerId,
        remaining: u8,
    },
    BonusRoll {
        player: PlayerId,
        reason: BonusReason,
    },
    PhaseChanged {
        player: PlayerId,
        phase: Phase,
    },
    /// A new turn began.
    TurnChanged {
        player: PlayerId,
        phase: Phase,
    },
    Won {
        player: PlayerId,
    },
}

impl GameEvent {
    /// The player this event concerns.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            GameEvent::DiceRolled { player, .. }
            | GameEvent::DoublesPenalty { player, .. }
            | GameEvent::MovesForfeited { player, .. }
            | GameEvent::BonusRoll { player, .. }
            | GameEvent::PhaseChanged { player, .. }
            | GameEvent::TurnChanged { player, .. }
            | GameEvent::Won { player } => *player,
            GameEvent::PieceEntered { piece, .. }
            | GameEvent::PieceMoved { piece, .. }
            | GameEvent::PieceCaptured { piece, .. }
            | GameEvent::ReachedGoal { piece } => piece.player,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::DiceRolled { player, dice } => write!(f, "{} rolled {}", player, dice),
            GameEvent::PieceEntered { piece, to } => write!(f, "{} entered at {}", piece, to),
            GameEvent::PieceMoved { piece, from, to } => {
                write!(f, "{} moved {} -> {}", piece, from, to)
            }
            GameEvent::PieceCaptured { piece, by, at } => {
                write!(f, "{} captured by {} at {}", piece, by, at)
            }
            GameEvent::ReachedGoal { piece } => write!(f, "{} reached goal", piece),
            GameEvent::DoublesPenalty { player, piece: Some(piece) } => {
                write!(f, "{} rolled too many doubles, {} sent to goal", player, piece)
            }
            GameEvent::DoublesPenalty { player, piece: None } => {
                write!(f, "{} rolled too many doubles", player)
            }
            GameEvent::MovesForfeited { player, remaining } => {
                write!(f, "{} forfeits {} move(s)", player, remaining)
            }
            GameEvent::BonusRoll { player, reason } => {
                write!(f, "{} rolls again ({:?})", player, reason)
            }
            GameEvent::PhaseChanged { player, phase } => write!(f, "{} is now {}", player, phase),
            GameEvent::TurnChanged { player, phase } => {
                write!(f, "{}'s turn ({})", player, phase)
            }
            GameEvent::Won { player } => write!(f, "{} wins", player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let piece = PieceId::new(PlayerId::new(2), 1);
        let by = PieceId::new(PlayerId::new(0), 0);

        assert_eq!(
            GameEvent::PieceCaptured { piece, by, at: 4 }.player(),
            PlayerId::new(2)
        );
        assert_eq!(
            GameEvent::Won { player: PlayerId::new(3) }.player(),
            PlayerId::new(3)
        );
    }

    #[test]
    fn test_event_display() {
        let event = GameEvent::DiceRolled {
            player: PlayerId::new(1),
            dice: DiceRoll::new(3, 3),
        };
        assert_eq!(event.to_string(), "Player 1 rolled (3, 3)");

        let penalty = GameEvent::DoublesPenalty {
            player: PlayerId::new(0),
            piece: None,
        };
        assert_eq!(penalty.to_string(), "Player 0 rolled too many doubles");
    }

    #[test]
    fn test_event_serde() {
        let event = GameEvent::BonusRoll {
            player: PlayerId::new(0),
            reason: BonusReason::Capture,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
