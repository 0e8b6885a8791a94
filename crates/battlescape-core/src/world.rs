//! The read-mostly interfaces the pathfinder consumes.
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Battlefield`] | volume and per-position tile lookup |
//! | [`PreviewSurface`] : [`Battlefield`] | mutable tiles for path preview markers |
//! | [`Mover`] | the acting unit's position, capabilities and budget |

use crate::direction::Direction;
use crate::geom::{Footprint, Position, Volume};
use crate::tile::Tile;
use crate::unit::{Faction, MovementType, UnitId};

/// Tile lookup over the battlefield box.
pub trait Battlefield {
    /// Size of the battlefield.
    fn volume(&self) -> Volume;

    /// The tile at `pos`, `None` outside the volume.
    fn tile(&self, pos: Position) -> Option<&Tile>;

    /// The tile directly below `pos`, `None` on level 0.
    fn tile_below(&self, pos: Position) -> Option<&Tile> {
        if pos.z <= 0 {
            return None;
        }
        self.tile(pos.below())
    }
}

/// A battlefield whose tiles can carry path preview markers.
pub trait PreviewSurface: Battlefield {
    fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile>;
}

/// The unit a path is planned for.
pub trait Mover {
    fn id(&self) -> UnitId;

    /// Anchor (north-west, lowest) tile of the unit.
    fn position(&self) -> Position;

    /// Side length of the unit's square footprint.
    fn size(&self) -> i32;

    fn footprint(&self) -> Footprint {
        Footprint::new(self.size())
    }

    /// Movement type granted by the unit's armour.
    fn movement_type(&self) -> MovementType;

    /// Races and craft that never land; force-walk does not apply to them.
    fn always_flies(&self) -> bool {
        false
    }

    /// Tracked or otherwise mechanical units: no dashing, restricted strafe.
    fn is_vehicle(&self) -> bool;

    fn faction(&self) -> Faction;

    /// Current facing, one of the compass directions.
    fn facing(&self) -> Direction;

    fn time_units(&self) -> i32;

    fn energy(&self) -> i32;

    fn is_kneeling(&self) -> bool {
        false
    }

    fn is_fire_immune(&self) -> bool {
        false
    }

    /// Whether this unit's side has spotted `other` this turn.
    fn has_spotted(&self, other: UnitId) -> bool;
}
