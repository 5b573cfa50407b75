//! Board cells.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// What a cell is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Normal,
    /// Part of a color's home pen.
    Home(Color),
    /// Pieces standing here cannot be captured.
    Safe,
}

/// A single grid cell. Immutable once the board is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
    pub kind: CellKind,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u8, col: u8, kind: CellKind) -> Self {
        Self { row, col, kind }
    }

    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.kind == CellKind::Safe
    }

    /// Orthogonal neighbour check.
    #[must_use]
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}
