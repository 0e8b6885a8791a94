//! The tile model movement planning reads: parts, walls, doors, terrain
//! level, fire, occupancy and path-preview markers.

use crate::direction::Direction;
use crate::unit::{Faction, MovementType, UnitId};

/// Step cost of an impassable part, and of any blocked step.
pub const IMPOSSIBLE: i32 = 255;

/// Terrain level of a tile whose object reaches the ceiling (top of a
/// staircase). Units standing there actually stand on the level above.
pub const STAIRS_TOP: i32 = -24;

// ---------------------------------------------------------------------------
// Parts
// ---------------------------------------------------------------------------

/// The four slots a tile can fill.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TilePart {
    Floor = 0,
    WestWall = 1,
    NorthWall = 2,
    Object = 3,
}

impl TilePart {
    pub const ALL: [TilePart; 4] = [
        TilePart::Floor,
        TilePart::WestWall,
        TilePart::NorthWall,
        TilePart::Object,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Wall shapes an object can take. Diagonal ones block both diagonal
/// crossings except along their own axis; edge ones act like a wall on one
/// or two sides of their tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BigWall {
    #[default]
    None,
    Block,
    /// Diagonal running north-east to south-west.
    Nesw,
    /// Diagonal running north-west to south-east.
    Nwse,
    West,
    North,
    East,
    South,
    EastAndSouth,
    WestAndNorth,
}

impl BigWall {
    /// Whether the shape blocks diagonal passage (block or a diagonal).
    #[inline]
    pub fn is_diagonal_blocker(self) -> bool {
        matches!(self, BigWall::Block | BigWall::Nesw | BigWall::Nwse)
    }

    /// Whether the shape is one of the edge walls.
    #[inline]
    pub fn is_edge(self) -> bool {
        !matches!(self, BigWall::None) && !self.is_diagonal_blocker()
    }
}

/// Static properties of one tile part.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartData {
    /// TU cost to cross/enter the part, indexed by [`MovementType`].
    pub tu_cost: [i32; 3],
    /// Vertical placement of the part's top surface (0 to -24).
    pub terrain_level: i32,
    pub big_wall: BigWall,
    pub door: bool,
    pub ufo_door: bool,
    /// The part looks like a floor but does not hold anything up.
    pub no_floor: bool,
    pub grav_lift: bool,
}

impl PartData {
    /// A part costing `cost` for every movement type.
    pub const fn uniform(cost: i32) -> Self {
        Self {
            tu_cost: [cost; 3],
            terrain_level: 0,
            big_wall: BigWall::None,
            door: false,
            ufo_door: false,
            no_floor: false,
            grav_lift: false,
        }
    }

    /// Cost for the given movement type.
    #[inline]
    pub fn cost(&self, mt: MovementType) -> i32 {
        self.tu_cost[mt.slot()]
    }
}

// ---------------------------------------------------------------------------
// Occupant
// ---------------------------------------------------------------------------

/// What the tile knows about the unit standing on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub id: UnitId,
    pub faction: Faction,
    /// Seen by the player's side.
    pub visible: bool,
    /// Unconscious or dead; does not block anything.
    pub out: bool,
    /// Footprint side length.
    pub size: i32,
    /// Standing height in voxels.
    pub height: i32,
    /// Hover height above the floor in voxels.
    pub float_height: i32,
}

// ---------------------------------------------------------------------------
// Path preview markers
// ---------------------------------------------------------------------------

/// Arrow drawn on a previewed tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerArrow {
    /// The direction of the next step out of this tile.
    Step(Direction),
    /// Last tile of the path.
    Destination,
}

/// Traffic-light colour of a previewed tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerColor {
    /// Affordable, and the reserved time is left untouched.
    Green,
    /// Affordable, but eats into the reserved time.
    Yellow,
    /// Not enough time units or energy.
    Red,
}

/// Annotation left on a tile by a path preview.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathMarker {
    pub arrow: MarkerArrow,
    /// Time units left after reaching this tile; only set on one tile of
    /// the footprint.
    pub tu_left: Option<i32>,
    pub color: MarkerColor,
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One cell of the battlefield.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    parts: [Option<PartData>; 4],
    ufo_door_open: [bool; 4],
    /// Turns of fire left; 0 when not burning.
    pub fire: i32,
    /// Currently in view of the opposing side's spotters.
    pub visible: bool,
    pub occupant: Option<Occupant>,
    pub marker: Option<PathMarker>,
}

impl Tile {
    /// An empty tile: open air, no walls.
    pub fn new() -> Self {
        Self::default()
    }

    /// The part in `slot`, if any.
    #[inline]
    pub fn part(&self, slot: TilePart) -> Option<&PartData> {
        self.parts[slot.slot()].as_ref()
    }

    /// Fill (or clear) a slot.
    pub fn set_part(&mut self, slot: TilePart, data: Option<PartData>) {
        self.parts[slot.slot()] = data;
    }

    /// Builder-style [`set_part`](Self::set_part).
    pub fn with_part(mut self, slot: TilePart, data: PartData) -> Self {
        self.set_part(slot, Some(data));
        self
    }

    /// Whether the UFO door in `slot` is open.
    #[inline]
    pub fn is_ufo_door_open(&self, slot: TilePart) -> bool {
        self.ufo_door_open[slot.slot()]
    }

    pub fn set_ufo_door_open(&mut self, slot: TilePart, open: bool) {
        self.ufo_door_open[slot.slot()] = open;
    }

    /// TU cost of the part in `slot`. Missing parts, open UFO doors and
    /// edge-shaped bigwall objects cost nothing.
    pub fn tu_cost(&self, slot: TilePart, mt: MovementType) -> i32 {
        let Some(part) = self.part(slot) else {
            return 0;
        };
        if part.ufo_door && self.is_ufo_door_open(slot) {
            return 0;
        }
        if slot == TilePart::Object && part.big_wall.is_edge() {
            return 0;
        }
        part.cost(mt)
    }

    /// Height of the walking surface: the higher (more negative) of floor
    /// and object levels, 0 when neither is present.
    pub fn terrain_level(&self) -> i32 {
        let floor = self.part(TilePart::Floor).map_or(0, |p| p.terrain_level);
        match self.part(TilePart::Object) {
            Some(obj) => floor.min(obj.terrain_level),
            None => floor,
        }
    }

    /// Whether nothing holds a unit up on this tile. The top of a staircase
    /// on the tile below counts as a floor.
    pub fn has_no_floor(&self, below: Option<&Tile>) -> bool {
        if below.is_some_and(|t| t.terrain_level() == STAIRS_TOP) {
            return false;
        }
        match self.part(TilePart::Floor) {
            Some(floor) => floor.no_floor,
            None => true,
        }
    }

    /// Whether the wall in `slot` is a door or a UFO door.
    pub fn has_door(&self, slot: TilePart) -> bool {
        self.part(slot).is_some_and(|p| p.door || p.ufo_door)
    }

    /// The bigwall shape of the object, [`BigWall::None`] without one.
    pub fn big_wall(&self) -> BigWall {
        self.part(TilePart::Object)
            .map_or(BigWall::None, |p| p.big_wall)
    }

    /// Whether the floor is a gravlift pad.
    pub fn is_grav_lift(&self) -> bool {
        self.part(TilePart::Floor).is_some_and(|p| p.grav_lift)
    }
}
