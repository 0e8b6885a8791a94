//! **battlescape-core**: shared types for tactical battle movement.
//!
//! This crate holds the leaf types used across the *battlescape* crates:
//! 3D geometry, step directions, the tile model, modifier-key snapshots and
//! the collaborator traits the pathfinder is written against.

pub mod direction;
pub mod geom;
pub mod input;
pub mod tile;
pub mod unit;
pub mod world;

pub use direction::Direction;
pub use geom::{Footprint, Position, Volume, VolumeIter};
pub use input::{InputState, ModMask};
pub use tile::{
    BigWall, IMPOSSIBLE, MarkerArrow, MarkerColor, Occupant, PartData, PathMarker, STAIRS_TOP,
    Tile, TilePart,
};
pub use unit::{Faction, MovementType, UnitId};
pub use world::{Battlefield, Mover, PreviewSurface};
