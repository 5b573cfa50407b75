//! Game configuration.
//!
//! A game is configured at startup by a `GameConfig`:
//! - `BoardGeometry`: grid size and ring inset (determines route length)
//! - `SeatConfig`: one per player, color and CPU flag
//! - rule constants: entry attempts and the consecutive-doubles penalty
//!
//! Configs are plain serde data so a presentation layer can load them from
//! whatever format it likes. `validate()` checks everything the engine
//! relies on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{Color, PlayerId};
use crate::board::BoardGeometry;

/// Default roll attempts while all pieces are at home.
pub const DEFAULT_ENTRY_ATTEMPTS: u8 = 3;

/// Default number of consecutive doubles that triggers the penalty.
pub const DEFAULT_PENALTY_DOUBLES: u8 = 3;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board of size {size} with ring inset {ring_inset} leaves no room for a ring")]
    RingTooSmall { size: u8, ring_inset: u8 },
    #[error("ring inset must be at least 1 to leave room for home pens")]
    NoHomePen,
    #[error("expected 2 to 4 seats, got {0}")]
    PlayerCount(usize),
    #[error("color {0} is seated twice")]
    DuplicateColor(Color),
    #[error("entry attempts must be at least 1")]
    NoEntryAttempts,
    #[error("penalty threshold must be at least 2 consecutive doubles, got {0}")]
    PenaltyThreshold(u8),
    #[error("first player {0} is not seated")]
    FirstPlayer(PlayerId),
}

/// One seat at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub color: Color,
    /// CPU seats are data only; the engine never picks moves for them.
    #[serde(default)]
    pub is_cpu: bool,
}

impl SeatConfig {
    #[must_use]
    pub const fn human(color: Color) -> Self {
        Self {
            color,
            is_cpu: false,
        }
    }

    #[must_use]
    pub const fn cpu(color: Color) -> Self {
        Self {
            color,
            is_cpu: true,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub board: BoardGeometry,

    /// Seats in turn order.
    pub seats: Vec<SeatConfig>,

    /// Roll attempts per turn while every movable piece is at home.
    #[serde(default = "default_entry_attempts")]
    pub entry_attempts: u8,

    /// Consecutive doubles that send the lead piece to goal.
    #[serde(default = "default_penalty_doubles")]
    pub penalty_doubles: u8,

    /// Who rolls first.
    #[serde(default)]
    pub first_player: u8,
}

fn default_entry_attempts() -> u8 {
    DEFAULT_ENTRY_ATTEMPTS
}

fn default_penalty_doubles() -> u8 {
    DEFAULT_PENALTY_DOUBLES
}

impl Default for GameConfig {
    /// Four seats on the standard board: seat 0 human, the rest CPU.
    fn default() -> Self {
        Self::with_player_count(4)
    }
}

impl GameConfig {
    /// Standard board with `player_count` seats.
    ///
    /// Two players sit in opposite corners; three or four take the corners
    /// in route order. Seat 0 is human, the rest CPU.
    #[must_use]
    pub fn with_player_count(player_count: usize) -> Self {
        let colors: Vec<Color> = match player_count {
            2 => vec![Color::Red, Color::Blue],
            n => Color::ALL.iter().copied().take(n).collect(),
        };

        let seats = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| SeatConfig { color, is_cpu: i != 0 })
            .collect();

        Self {
            board: BoardGeometry::default(),
            seats,
            entry_attempts: DEFAULT_ENTRY_ATTEMPTS,
            penalty_doubles: DEFAULT_PENALTY_DOUBLES,
            first_player: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Seat colors in turn order.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        self.seats.iter().map(|s| s.color).collect()
    }

    /// Check every constraint the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;

        if !(2..=4).contains(&self.seats.len()) {
            return Err(ConfigError::PlayerCount(self.seats.len()));
        }

        for (i, seat) in self.seats.iter().enumerate() {
            if self.seats[..i].iter().any(|s| s.color == seat.color) {
                return Err(ConfigError::DuplicateColor(seat.color));
            }
        }

        if self.entry_attempts == 0 {
            return Err(ConfigError::NoEntryAttempts);
        }

        if self.penalty_doubles < 2 {
            return Err(ConfigError::PenaltyThreshold(self.penalty_doubles));
        }

        if usize::from(self.first_player) >= self.seats.len() {
            return Err(ConfigError::FirstPlayer(PlayerId::new(self.first_player)));
        }

        Ok(())
    }
}
