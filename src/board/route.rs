//! The shared route and per-player route arithmetic.
//!
//! All players walk the same cyclic ring of `L` cells, each starting from
//! the corner next to their own home pen. Positions are stored as absolute
//! route indices; a player's progress is the relative position
//! `(absolute - start) mod L`. Relative position `L - 1` is the goal, one
//! full circuit from the player's own start.

use rustc_hash::FxHashMap;

use super::cell::Cell;
use super::geometry::BoardGeometry;
use crate::core::{Color, ConfigError, PlayerId, PlayerMap};

/// Ordered cyclic sequence of ring cells plus each player's start offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    cells: Vec<Cell>,
    starts: PlayerMap<usize>,
    lookup: FxHashMap<(u8, u8), usize>,
}

impl Route {
    /// Enumerate the ring and locate every seat's start cell.
    ///
    /// Deterministic: the same geometry and seat colors always give the
    /// same route and offsets. Geometry that fails validation is refused.
    pub fn build(geometry: &BoardGeometry, seats: &[Color]) -> Result<Self, ConfigError> {
        geometry.validate()?;

        let cells: Vec<Cell> = geometry
            .ring_coords()
            .into_iter()
            .map(|(row, col)| Cell::new(row, col, geometry.kind_at(row, col)))
            .collect();

        let lookup: FxHashMap<(u8, u8), usize> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| ((c.row, c.col), i))
            .collect();

        let starts = PlayerMap::new(seats.len(), |player| {
            let corner = geometry.start_corner(seats[player.index()]);
            lookup.get(&corner).copied().unwrap_or(0)
        });

        Ok(Self {
            cells,
            starts,
            lookup,
        })
    }

    /// Route length `L`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at an absolute index, wrapping.
    #[must_use]
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index % self.len()]
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Absolute index of the ring cell at `(row, col)`.
    #[must_use]
    pub fn index_of(&self, row: u8, col: u8) -> Option<usize> {
        self.lookup.get(&(row, col)).copied()
    }

    #[must_use]
    pub fn is_safe(&self, index: usize) -> bool {
        self.cell(index).is_safe()
    }

    /// Absolute index where `player` enters the route.
    #[must_use]
    pub fn start_index(&self, player: PlayerId) -> usize {
        self.starts[player]
    }

    /// Absolute index of `player`'s last cell: one full circuit from start.
    #[must_use]
    pub fn goal_index(&self, player: PlayerId) -> usize {
        (self.start_index(player) + self.len() - 1) % self.len()
    }

    /// Progress of an absolute index from `player`'s start, in `0..L`.
    #[must_use]
    pub fn relative_position(&self, player: PlayerId, absolute: usize) -> usize {
        let len = self.len();
        (absolute % len + len - self.start_index(player)) % len
    }

    /// Inverse of [`Route::relative_position`].
    #[must_use]
    pub fn absolute_index(&self, player: PlayerId, relative: usize) -> usize {
        (self.start_index(player) + relative) % self.len()
    }

    /// True when `absolute` is `player`'s goal cell.
    #[must_use]
    pub fn is_goal_index(&self, player: PlayerId, absolute: usize) -> bool {
        self.relative_position(player, absolute) == self.len() - 1
    }

    /// True when `steps` from `absolute` lands exactly on `player`'s goal.
    #[must_use]
    pub fn would_reach_goal(&self, player: PlayerId, absolute: usize, steps: usize) -> bool {
        self.relative_position(player, absolute) + steps == self.len() - 1
    }
}
