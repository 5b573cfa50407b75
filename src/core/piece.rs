//! Pieces and their positions.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Pieces owned by each player.
pub const PIECES_PER_PLAYER: usize = 4;

/// Piece identifier: owning player plus index `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId {
    pub player: PlayerId,
    pub index: u8,
}

impl PieceId {
    #[must_use]
    pub const fn new(player: PlayerId, index: u8) -> Self {
        Self { player, index }
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} piece {}", self.player, self.index)
    }
}

/// Where a piece is.
///
/// `Goal` is terminal: nothing moves a piece out of it and capture ignores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// In the starting pen, not yet entered.
    #[default]
    Home,
    /// Absolute index into the shared route.
    OnRoute(usize),
    /// Completed the circuit.
    Goal,
}

impl Position {
    #[must_use]
    pub fn is_home(self) -> bool {
        matches!(self, Position::Home)
    }

    #[must_use]
    pub fn is_goal(self) -> bool {
        matches!(self, Position::Goal)
    }

    /// The absolute route index, if the piece is on the route.
    #[must_use]
    pub fn route_index(self) -> Option<usize> {
        match self {
            Position::OnRoute(index) => Some(index),
            Position::Home | Position::Goal => None,
        }
    }
}

/// A single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub position: Position,
}

impl Piece {
    /// A new piece, waiting at home.
    #[must_use]
    pub fn new(id: PieceId) -> Self {
        Self {
            id,
            position: Position::Home,
        }
    }
}
