//! Board geometry: grid size, home pens, the ring and its safe cells.
//!
//! The board is a `size × size` grid. Each corner holds a
//! `ring_inset × ring_inset` home pen. The shared ring is the square
//! outline running through rows and columns `ring_inset ..= size-1-ring_inset`,
//! with a safe cell at the midpoint of each side.
//!
//! ```text
//!   R R . . . . . . . . . . . Y Y
//!   R R . . . . . . . . . . . Y Y
//!   . . o o o o o S o o o o o . .
//!   . . o . . . . . . . . . o . .
//!   ...
//! ```

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellKind};
use crate::core::{Color, ConfigError};

/// Grid dimensions. `size = 15, ring_inset = 2` gives a 40-cell route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub size: u8,
    pub ring_inset: u8,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            size: 15,
            ring_inset: 2,
        }
    }
}

impl BoardGeometry {
    #[must_use]
    pub const fn new(size: u8, ring_inset: u8) -> Self {
        Self { size, ring_inset }
    }

    /// Check the ring fits and is long enough for any single die.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_inset == 0 {
            return Err(ConfigError::NoHomePen);
        }
        // Ring side of 3 gives an 8-cell route: room for a full die of 6.
        if u16::from(self.size) < 2 * u16::from(self.ring_inset) + 3 {
            return Err(ConfigError::RingTooSmall {
                size: self.size,
                ring_inset: self.ring_inset,
            });
        }
        Ok(())
    }

    /// First ring row/column.
    #[must_use]
    pub fn ring_lo(&self) -> u8 {
        self.ring_inset
    }

    /// Last ring row/column.
    ///
    /// Saturates on geometry that fails `validate`.
    #[must_use]
    pub fn ring_hi(&self) -> u8 {
        self.size.saturating_sub(1).saturating_sub(self.ring_inset)
    }

    /// Cells along one side of the ring, corners included.
    #[must_use]
    pub fn ring_side(&self) -> usize {
        usize::from(self.ring_hi().saturating_sub(self.ring_lo())) + 1
    }

    /// Number of cells on the route (`L`).
    #[must_use]
    pub fn route_len(&self) -> usize {
        4 * (self.ring_side() - 1)
    }

    /// The ring corner next to a color's home pen. Pieces of that color
    /// enter the route here.
    #[must_use]
    pub fn start_corner(&self, color: Color) -> (u8, u8) {
        let (lo, hi) = (self.ring_lo(), self.ring_hi());
        match color {
            Color::Red => (lo, lo),
            Color::Green => (hi, lo),
            Color::Blue => (hi, hi),
            Color::Yellow => (lo, hi),
        }
    }

    /// Classify a grid cell.
    #[must_use]
    pub fn kind_at(&self, row: u8, col: u8) -> CellKind {
        let inset = self.ring_inset;
        let far = self.size.saturating_sub(inset);
        let (lo, hi, mid) = (self.ring_lo(), self.ring_hi(), self.size / 2);

        match (row < inset, row >= far, col < inset, col >= far) {
            (true, _, true, _) => CellKind::Home(Color::Red),
            (true, _, _, true) => CellKind::Home(Color::Yellow),
            (_, true, true, _) => CellKind::Home(Color::Green),
            (_, true, _, true) => CellKind::Home(Color::Blue),
            _ if (row == lo || row == hi) && col == mid => CellKind::Safe,
            _ if (col == lo || col == hi) && row == mid => CellKind::Safe,
            _ => CellKind::Normal,
        }
    }

    /// Every grid cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(usize::from(self.size) * usize::from(self.size));
        for row in 0..self.size {
            for col in 0..self.size {
                cells.push(Cell::new(row, col, self.kind_at(row, col)));
            }
        }
        cells
    }

    /// Ring coordinates in route order.
    ///
    /// Starts at the top-left corner, runs down the left side, right along
    /// the bottom, up the right side and back left along the top.
    #[must_use]
    pub fn ring_coords(&self) -> Vec<(u8, u8)> {
        let (lo, hi) = (self.ring_lo(), self.ring_hi());
        let mut coords = Vec::with_capacity(self.route_len());

        coords.push((lo, lo));
        coords.extend((lo + 1..=hi).map(|row| (row, lo)));
        coords.extend((lo + 1..=hi).map(|col| (hi, col)));
        coords.extend((lo..hi).rev().map(|row| (row, hi)));
        coords.extend((lo + 1..hi).rev().map(|col| (lo, col)));

        coords
    }
}
