//! Board model: cells, geometry and the shared route.
//!
//! ## Key Types
//!
//! - `BoardGeometry`: Grid size and ring inset (configuration)
//! - `Cell`, `CellKind`: Immutable grid cells (normal, home pen, safe)
//! - `Route`: The cyclic ring all players walk, with per-player offsets
//! - `Board`: Grid plus route, built once at game setup

pub mod cell;
pub mod geometry;
pub mod layout;
pub mod route;

pub use cell::{Cell, CellKind};
pub use geometry::BoardGeometry;
pub use layout::Board;
pub use route::Route;
