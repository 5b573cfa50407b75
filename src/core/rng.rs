//! Deterministic dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice
//! - **Serializable**: O(1) state capture and restore, so a saved
//!   `GameState` continues the exact same dice stream
//!
//! ```
//! use parques_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_dice(), b.roll_dice());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Faces on each die.
pub const DIE_FACES: u8 = 6;

/// A roll of the two dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    pub d1: u8,
    pub d2: u8,
}

impl DiceRoll {
    #[must_use]
    pub const fn new(d1: u8, d2: u8) -> Self {
        Self { d1, d2 }
    }

    /// Both dice show the same value.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.d1 == self.d2
    }

    /// Both dice are in `1..=6`.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.d1 >= 1 && self.d1 <= DIE_FACES && self.d2 >= 1 && self.d2 <= DIE_FACES
    }

    #[must_use]
    pub const fn sum(self) -> u8 {
        self.d1 + self.d2
    }

    #[must_use]
    pub const fn values(self) -> [u8; 2] {
        [self.d1, self.d2]
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.d1, self.d2)
    }
}

/// Seeded dice source backed by ChaCha8.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// A single die, uniform on `1..=6`.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    /// Roll both dice.
    pub fn roll_dice(&mut self) -> DiceRoll {
        let d1 = self.roll_die();
        let d2 = self.roll_die();
        DiceRoll::new(d1, d2)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position so restoring is O(1) regardless of how
/// many dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}
