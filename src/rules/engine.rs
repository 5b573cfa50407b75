//! Rules engine trait.
//!
//! A rules implementation defines:
//! - What actions are legal
//! - How actions modify state
//! - When the game is over

use crate::core::{Action, GameConfig, GameState, PlayerId};
use crate::events::GameEvent;

use super::error::RuleViolation;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// The engine holds only immutable rules data; every call takes the game
/// state explicitly, so one engine can drive any number of games.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if player can't act
/// - `apply_action`: Must be deterministic given the state (dice come from
///   the state's RNG); a refused action leaves the state untouched
/// - `is_terminal`: Return None if game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Every action `player` may take right now.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action to the game state, returning the events it produced.
    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<Vec<GameEvent>, RuleViolation>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Check if an action is legal.
    fn is_legal(&self, state: &GameState, player: PlayerId, action: &Action) -> bool {
        self.legal_actions(state, player).contains(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult {
            winner: PlayerId::new(1),
        };
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
    }
}
