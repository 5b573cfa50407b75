//! Core engine types: players, pieces, dice, configuration, actions, state.
//!
//! Everything here is plain data. Rules live in `rules` and `game`.

pub mod action;
pub mod config;
pub mod piece;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{ConfigError, GameConfig, SeatConfig, DEFAULT_ENTRY_ATTEMPTS, DEFAULT_PENALTY_DOUBLES};
pub use piece::{Piece, PieceId, Position, PIECES_PER_PLAYER};
pub use player::{Color, Player, PlayerId, PlayerMap};
pub use rng::{DiceRoll, GameRng, GameRngState, DIE_FACES};
pub use state::{GameState, PendingDie, Phase, TurnSignals, TurnState};
