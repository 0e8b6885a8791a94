//! **battlescape-map**: an in-memory battlefield for the movement planner.
//!
//! [`BattleMap`] stores tiles flat and implements the
//! [`Battlefield`](battlescape_core::Battlefield) and
//! [`PreviewSurface`](battlescape_core::PreviewSurface) traits, [`Soldier`]
//! implements [`Mover`](battlescape_core::Mover), and [`Layout`] turns ASCII
//! level plans into maps.

mod error;
pub mod grid;
pub mod layout;
pub mod soldier;

pub use error::{LayoutError, PlacementError};
pub use grid::BattleMap;
pub use layout::{DOOR_COST, FLOOR_COST, LEGEND, Layout, glyph_tile};
pub use soldier::Soldier;
