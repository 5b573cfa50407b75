//! Player identification, seats and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Parqués seats 2 to 4 players.
//!
//! ## PlayerMap
//!
//! Efficient per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.
//!
//! ## Player
//!
//! A seated player: fixed identity (color, CPU flag) plus its four pieces.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::piece::{Piece, PieceId, Position, PIECES_PER_PLAYER};

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player seated after this one in a game of `player_count` players.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use parques_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Seat color. Each color owns one corner home pen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    /// Colors in seat order, matching the ring corners counter-clockwise
    /// from the top-left.
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// A seated player and its pieces.
///
/// Identity (`id`, `color`, `is_cpu`) is fixed at game start. Only piece
/// positions change during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    color: Color,
    is_cpu: bool,
    /// The player's pieces, indexed by `PieceId::index`.
    pub pieces: [Piece; PIECES_PER_PLAYER],
}

impl Player {
    /// Create a player with all pieces at home.
    #[must_use]
    pub fn new(id: PlayerId, color: Color, is_cpu: bool) -> Self {
        Self {
            id,
            color,
            is_cpu,
            pieces: std::array::from_fn(|i| Piece::new(PieceId::new(id, i as u8))),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// CPU seats are plain data; the engine never decides for them.
    #[must_use]
    pub fn is_cpu(&self) -> bool {
        self.is_cpu
    }

    /// Pieces still in play or waiting at home (everything not in goal).
    pub fn movable_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| !p.position.is_goal())
    }

    /// Pieces waiting in the home pen, in piece order.
    pub fn pieces_at_home(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.position.is_home())
    }

    /// Pieces currently on the route, in piece order.
    pub fn pieces_on_route(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.position.route_index().is_some())
    }

    /// True when every movable piece is still at home.
    ///
    /// A player with every piece in goal has nothing movable and is not
    /// considered "all home".
    #[must_use]
    pub fn all_movable_at_home(&self) -> bool {
        let mut movable = self.movable_pieces().peekable();
        movable.peek().is_some() && movable.all(|p| p.position == Position::Home)
    }

    /// True when every piece has reached the goal.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.pieces.iter().all(|p| p.position.is_goal())
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
/// Use `PlayerMap::new()` to create with a factory function,
/// or `PlayerMap::with_value()` to initialize all entries to the same value.
///
/// ## Example
///
/// ```
/// use parques_engine::core::{PlayerId, PlayerMap};
///
/// let mut captures: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
///
/// captures[PlayerId::new(1)] += 1;
/// assert_eq!(captures[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, or `None` for an unseated ID.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over all values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate mutably over all values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
