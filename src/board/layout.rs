//! The full board: every grid cell plus the route through them.

use super::cell::{Cell, CellKind};
use super::geometry::BoardGeometry;
use super::route::Route;
use crate::core::{Color, ConfigError};

/// Immutable board built once at game setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    geometry: BoardGeometry,
    cells: Vec<Cell>,
    route: Route,
}

impl Board {
    /// Build the grid and route for the given seat colors.
    pub fn new(geometry: BoardGeometry, seats: &[Color]) -> Result<Self, ConfigError> {
        let route = Route::build(&geometry, seats)?;

        Ok(Self {
            geometry,
            cells: geometry.cells(),
            route,
        })
    }

    #[must_use]
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// All grid cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn cell_at(&self, row: u8, col: u8) -> Option<Cell> {
        if row >= self.geometry.size || col >= self.geometry.size {
            return None;
        }
        let size = usize::from(self.geometry.size);
        self.cells.get(usize::from(row) * size + usize::from(col)).copied()
    }

    /// Cells of a color's home pen.
    pub fn home_cells(&self, color: Color) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(move |c| c.kind == CellKind::Home(color))
    }
}
