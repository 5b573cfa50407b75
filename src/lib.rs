//! # parques-engine
//!
//! Turn and movement rules for Parqués, a race board game for two to four
//! players.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: The engine never renders, animates or reads input.
//!    Each call returns the events it produced and a signals snapshot; a
//!    presentation layer drives it and draws the results.
//!
//! 2. **Explicit State**: `GameState` is plain serializable data passed to
//!    every call. The engine itself only holds the board and rule constants.
//!
//! 3. **Refusals, Not Crashes**: Acting out of turn or asking for an
//!    illegal move returns a `RuleViolation` and leaves the state untouched.
//!
//! ## Architecture
//!
//! - **Deterministic Dice**: `GameRng` is a seeded ChaCha stream that
//!   serializes with the state, and every roll is recorded with its dice so
//!   a history replays exactly.
//!
//! - **Persistent Data Structures**: action history is an `im` vector, so
//!   cloning a state to explore a move is cheap.
//!
//! ## Modules
//!
//! - `core`: Players, pieces, dice RNG, configuration, actions, state
//! - `board`: Cells, board geometry and the shared route
//! - `rules`: `RulesEngine` trait, movement and capture resolvers, errors
//! - `events`: Events returned from engine calls
//! - `game`: The Parqués engine, its builder and the turn state machine

pub mod board;
pub mod core;
pub mod events;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Color, ConfigError, DiceRoll, GameConfig, GameRng, GameRngState,
    GameState, Phase, Piece, PieceId, Player, PlayerId, PlayerMap, Position, SeatConfig,
    TurnSignals, TurnState,
};

pub use crate::board::{Board, BoardGeometry, Cell, CellKind, Route};

pub use crate::rules::{
    DiceInput, Destination, Destinations, GameResult, MoveOutcome, RuleViolation, RulesEngine,
};

pub use crate::events::{BonusReason, GameEvent};

pub use crate::game::{MoveReport, Parques, ParquesBuilder, RollReport};
