//! A plain-data unit implementing [`Mover`].

use std::collections::HashSet;

use battlescape_core::{Direction, Faction, MovementType, Mover, Occupant, Position, UnitId};

/// Standing height of a default soldier, in voxels.
pub const DEFAULT_HEIGHT: i32 = 22;

/// A unit as the battlefield sees it.
///
/// Fields are public; the `with_*` methods are shorthands for building test
/// and scenario units.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Soldier {
    pub id: UnitId,
    pub pos: Position,
    pub size: i32,
    pub movement: MovementType,
    pub always_flies: bool,
    pub vehicle: bool,
    pub faction: Faction,
    pub facing: Direction,
    pub time_units: i32,
    pub energy: i32,
    pub kneeling: bool,
    pub fire_immune: bool,
    pub height: i32,
    pub float_height: i32,
    /// Unconscious or dead.
    pub out: bool,
    /// Seen by the player's side.
    pub visible: bool,
    /// Enemy units this unit's side has spotted this turn.
    pub spotted: HashSet<UnitId>,
}

impl Soldier {
    /// A small walking player soldier facing north with a full budget.
    pub fn new(id: u32, pos: Position) -> Self {
        Self {
            id: UnitId(id),
            pos,
            size: 1,
            movement: MovementType::Walk,
            always_flies: false,
            vehicle: false,
            faction: Faction::Player,
            facing: Direction::North,
            time_units: 60,
            energy: 90,
            kneeling: false,
            fire_immune: false,
            height: DEFAULT_HEIGHT,
            float_height: 0,
            out: false,
            visible: true,
            spotted: HashSet::new(),
        }
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn with_movement(mut self, movement: MovementType) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_budget(mut self, time_units: i32, energy: i32) -> Self {
        self.time_units = time_units;
        self.energy = energy;
        self
    }

    pub fn vehicle(mut self) -> Self {
        self.vehicle = true;
        self
    }

    pub fn kneeling(mut self) -> Self {
        self.kneeling = true;
        self
    }

    /// The record written to each tile the unit covers.
    pub fn occupant(&self) -> Occupant {
        Occupant {
            id: self.id,
            faction: self.faction,
            visible: self.visible,
            out: self.out,
            size: self.size,
            height: self.height,
            float_height: self.float_height,
        }
    }
}

impl Mover for Soldier {
    fn id(&self) -> UnitId {
        self.id
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn size(&self) -> i32 {
        self.size
    }

    fn movement_type(&self) -> MovementType {
        self.movement
    }

    fn always_flies(&self) -> bool {
        self.always_flies
    }

    fn is_vehicle(&self) -> bool {
        self.vehicle
    }

    fn faction(&self) -> Faction {
        self.faction
    }

    fn facing(&self) -> Direction {
        self.facing
    }

    fn time_units(&self) -> i32 {
        self.time_units
    }

    fn energy(&self) -> i32 {
        self.energy
    }

    fn is_kneeling(&self) -> bool {
        self.kneeling
    }

    fn is_fire_immune(&self) -> bool {
        self.fire_immune
    }

    fn has_spotted(&self, other: UnitId) -> bool {
        self.spotted.contains(&other)
    }
}
