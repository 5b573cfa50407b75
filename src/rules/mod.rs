//! Rules: the `RulesEngine` trait and the pure resolvers it is built from.
//!
//! ## Key Types
//!
//! - `RulesEngine`, `GameResult`: Interface a game implementation exposes
//! - `movement`: Legal destinations for a piece and some dice
//! - `capture`: Applies a committed move (captures, goal, win)
//! - `RuleViolation`: Why an action was refused
//!
//! The resolvers never touch turn bookkeeping; that belongs to the turn
//! state machine in `game`.

pub mod capture;
pub mod engine;
pub mod error;
pub mod movement;

pub use capture::{resolve_move, send_to_goal, MoveOutcome};
pub use engine::{GameResult, RulesEngine};
pub use error::RuleViolation;
pub use movement::{advance, destinations, entry_index, DiceInput, Destination, Destinations};
