//! Parqués: the rules engine built on `core`, `board` and `rules`.
//!
//! - Two to four players race four pieces each around a shared ring
//! - Pieces leave home on doubles and must land exactly on their goal
//! - Landing on an opponent outside a safe cell sends it home
//! - First player with every piece in goal wins
//!
//! ## Key Types
//!
//! - `ParquesBuilder`: Configures seats, board and rule constants
//! - `Parques`: Stateless rules engine (`RulesEngine` implementation)
//! - `RollReport`, `MoveReport`: Events and signals from each call

mod parques;
mod turn;

pub use parques::{MoveReport, Parques, ParquesBuilder, RollReport};
