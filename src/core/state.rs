//! Game state: players, pieces and the turn state machine's data.
//!
//! ## TurnState
//!
//! Everything about the turn in progress:
//! - Whose turn it is and which phase it is in
//! - Roll attempts and pending single-die moves left
//! - Consecutive doubles rolled this turn
//!
//! Rebuilt from piece positions at the start of every turn and never
//! carried across turns.
//!
//! ## GameState
//!
//! Complete, serializable game state:
//! - Players and their piece positions
//! - Turn state, turn counter, winner
//! - Dice RNG and action history
//!
//! The rules engine is stateless; every call takes the state explicitly.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::piece::{Piece, PieceId};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::{DiceRoll, GameRng};

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Every movable piece is at home: roll for doubles to enter.
    Entering,
    /// At least one piece is out: each roll yields two single-die moves.
    Moving,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Entering => f.write_str("entering"),
            Phase::Moving => f.write_str("moving"),
        }
    }
}

/// One die from the current roll, usable once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDie {
    pub value: u8,
    pub used: bool,
}

impl PendingDie {
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self { value, used: false }
    }
}

/// State of the turn in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Player whose turn it is.
    pub current: PlayerId,

    pub phase: Phase,

    /// Rolls still allowed this turn.
    pub attempts_left: u8,

    /// Single-die moves still owed from the last roll.
    pub moves_left: u8,

    pub consecutive_doubles: u8,

    /// Dice of the last Moving-phase roll.
    pub pending_dice: SmallVec<[PendingDie; 2]>,

    /// Last roll, if any this turn.
    pub last_roll: Option<DiceRoll>,
}

impl TurnState {
    /// Fresh turn for `player`, phase derived from its piece positions.
    ///
    /// Entering grants `entry_attempts` rolls; Moving grants one.
    #[must_use]
    pub fn start(player: &Player, entry_attempts: u8) -> Self {
        let (phase, attempts_left) = if player.all_movable_at_home() {
            (Phase::Entering, entry_attempts)
        } else {
            (Phase::Moving, 1)
        };

        Self {
            current: player.id(),
            phase,
            attempts_left,
            moves_left: 0,
            consecutive_doubles: 0,
            pending_dice: SmallVec::new(),
            last_roll: None,
        }
    }

    /// Load a Moving-phase roll as two pending single-die moves.
    pub fn set_pending(&mut self, roll: DiceRoll) {
        self.pending_dice = roll.values().into_iter().map(PendingDie::new).collect();
        self.moves_left = self.pending_dice.len() as u8;
    }

    /// Unused pending dice as `(slot, value)`.
    pub fn unused_dice(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.pending_dice
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.used)
            .map(|(slot, d)| (slot, d.value))
    }

    /// Mark a pending die used and count the move.
    pub fn use_die(&mut self, slot: usize) {
        if let Some(die) = self.pending_dice.get_mut(slot) {
            debug_assert!(!die.used, "die slot {} used twice", slot);
            die.used = true;
            self.moves_left = self.moves_left.saturating_sub(1);
        }
    }

    /// Same player rolls once more.
    pub fn grant_bonus_roll(&mut self) {
        self.attempts_left = 1;
        self.moves_left = 0;
        self.pending_dice.clear();
    }

    /// The player may roll now.
    #[must_use]
    pub fn dice_ready(&self) -> bool {
        self.attempts_left > 0 && self.moves_left == 0
    }
}

/// Snapshot of everything a presentation layer shows about the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSignals {
    pub current_player: PlayerId,
    pub phase: Phase,
    pub attempts_left: u8,
    pub moves_left: u8,
    pub dice_ready: bool,
    pub winner: Option<PlayerId>,
}

/// Complete game state.
///
/// Cloning is cheap: history is an `im` persistent vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seated players and their pieces.
    pub players: PlayerMap<Player>,

    /// The turn in progress.
    pub turn: TurnState,

    /// Turn number (starts at 1, counts player changes).
    pub turn_number: u32,

    /// Action sequence within turn.
    action_sequence: u32,

    /// Set once a player has every piece in goal. The game halts.
    pub winner: Option<PlayerId>,

    /// Dice source.
    pub rng: GameRng,

    /// Every accepted action, in order.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// Initial state: every piece at home, `config.first_player` to roll.
    ///
    /// The config is assumed validated.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let players = PlayerMap::new(config.player_count(), |id| {
            let seat = config.seats[id.index()];
            Player::new(id, seat.color, seat.is_cpu)
        });
        let first = PlayerId::new(config.first_player);
        let turn = TurnState::start(&players[first], config.entry_attempts);

        Self {
            players,
            turn,
            turn_number: 1,
            action_sequence: 0,
            winner: None,
            rng: GameRng::new(seed),
            history: Vector::new(),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(player)
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.current
    }

    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.players.get(id.player)?.pieces.get(usize::from(id.index))
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.players
            .get_mut(id.player)?
            .pieces
            .get_mut(usize::from(id.index))
    }

    /// Every piece on the board, in seat then piece order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.players.values().flat_map(|p| p.pieces.iter())
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Current turn signals.
    #[must_use]
    pub fn signals(&self) -> TurnSignals {
        TurnSignals {
            current_player: self.turn.current,
            phase: self.turn.phase,
            attempts_left: self.turn.attempts_left,
            moves_left: self.turn.moves_left,
            dice_ready: !self.is_over() && self.turn.dice_ready(),
            winner: self.winner,
        }
    }

    /// Hand the turn to `next` and rebuild the turn state for it.
    pub fn begin_turn(&mut self, next: PlayerId, entry_attempts: u8) {
        self.turn = TurnState::start(&self.players[next], entry_attempts);
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// Record an action in history.
    pub fn record_action(&mut self, player: PlayerId, action: Action, dice: Option<DiceRoll>) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history.push_back(ActionRecord::new(
            player,
            action,
            dice,
            self.turn_number,
            sequence,
        ));
    }
}
