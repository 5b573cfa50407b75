//! The Parqués rules engine and its builder.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, BoardGeometry, Route};
use crate::core::{
    Action, ActionRecord, ConfigError, DiceRoll, GameConfig, GameState, PlayerId, SeatConfig,
    TurnSignals,
};
use crate::events::GameEvent;
use crate::rules::{GameResult, MoveOutcome, RuleViolation, RulesEngine};

/// What a roll did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    pub dice: DiceRoll,
    pub events: Vec<GameEvent>,
    /// Turn signals after the roll.
    pub signals: TurnSignals,
}

/// What a committed move did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    pub events: Vec<GameEvent>,
    /// Turn signals after the move.
    pub signals: TurnSignals,
}

/// Parqués rules: validated configuration plus the board built from it.
///
/// Holds no per-game data. Turn logic lives in `turn.rs`.
#[derive(Clone, Debug)]
pub struct Parques {
    config: GameConfig,
    board: Board,
}

/// Builder for creating a Parqués game.
///
/// ```
/// use parques_engine::game::ParquesBuilder;
///
/// let (game, state) = ParquesBuilder::new().player_count(2).build(7).unwrap();
/// assert_eq!(state.player_count(), 2);
/// assert_eq!(game.route().len(), 40);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParquesBuilder {
    config: GameConfig,
    player_count: Option<usize>,
}

impl ParquesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat `count` players with the standard colors.
    ///
    /// Overrides any earlier `seats`.
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = Some(count);
        self
    }

    /// Explicit seats in turn order.
    pub fn seats(mut self, seats: Vec<SeatConfig>) -> Self {
        self.config.seats = seats;
        self.player_count = None;
        self
    }

    /// Square board of `size` cells with the default ring inset.
    pub fn board_size(mut self, size: u8) -> Self {
        self.config.board.size = size;
        self
    }

    pub fn geometry(mut self, geometry: BoardGeometry) -> Self {
        self.config.board = geometry;
        self
    }

    pub fn entry_attempts(mut self, attempts: u8) -> Self {
        self.config.entry_attempts = attempts;
        self
    }

    pub fn penalty_doubles(mut self, count: u8) -> Self {
        self.config.penalty_doubles = count;
        self
    }

    pub fn first_player(mut self, player: PlayerId) -> Self {
        self.config.first_player = player.0;
        self
    }

    /// Start from a complete config, e.g. one loaded from a file.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self.player_count = None;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> Result<(Parques, GameState), ConfigError> {
        let mut config = self.config;
        if let Some(count) = self.player_count {
            if !(2..=4).contains(&count) {
                return Err(ConfigError::PlayerCount(count));
            }
            let cpu_flags: Vec<bool> = config.seats.iter().map(|s| s.is_cpu).collect();
            config.seats = GameConfig::with_player_count(count).seats;
            // Keep CPU flags already chosen for seats that survive.
            for (seat, is_cpu) in config.seats.iter_mut().zip(cpu_flags) {
                seat.is_cpu = is_cpu;
            }
        }

        let game = Parques::new(config)?;
        let state = game.new_game(seed);
        Ok((game, state))
    }
}

impl Parques {
    /// Validate `config` and build the board.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board, &config.colors())?;
        debug!(
            players = config.player_count(),
            route_len = board.route().len(),
            "parques game configured"
        );
        Ok(Self { config, board })
    }

    /// Fresh state: every piece at home, first player to roll.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        GameState::new(&self.config, seed)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        self.board.route()
    }

    /// Rebuild a game from its action history.
    ///
    /// Rolls use the dice stored in each record, so the result does not
    /// depend on the RNG stream; the returned state's RNG is the fresh one
    /// for `seed`.
    pub fn replay<'a>(
        &self,
        seed: u64,
        history: impl IntoIterator<Item = &'a ActionRecord>,
    ) -> Result<GameState, RuleViolation> {
        let mut state = self.new_game(seed);
        for record in history {
            match (record.action, record.dice) {
                (Action::Roll, Some(dice)) => {
                    self.apply_roll(&mut state, record.player, dice)?;
                }
                (Action::Roll, None) => {
                    self.roll(&mut state, record.player)?;
                }
                (Action::Move { piece, destination }, _) => {
                    self.commit_move(&mut state, record.player, piece, destination)?;
                }
            }
        }
        Ok(state)
    }
}

impl RulesEngine for Parques {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.is_over() || state.current_player() != player {
            return vec![];
        }

        if state.turn.dice_ready() {
            return vec![Action::Roll];
        }

        let mut actions = Vec::new();
        for (piece, destination) in self.pending_moves(state, player) {
            let action = Action::Move { piece, destination };
            if !actions.contains(&action) {
                actions.push(action);
            }
        }
        actions
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<Vec<GameEvent>, RuleViolation> {
        match *action {
            Action::Roll => self.roll(state, player).map(|report| report.events),
            Action::Move { piece, destination } => self
                .commit_move(state, player, piece, destination)
                .map(|report| report.events),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.winner.map(|winner| GameResult { winner })
    }
}
