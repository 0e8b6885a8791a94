//! Small unit-side value types shared by the map and the pathfinder.

use std::fmt;

/// How a unit's armour lets it move. Tile parts carry one TU cost per
/// variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementType {
    #[default]
    Walk,
    Fly,
    /// Hover-sliding vehicles: ground-bound but with their own costs.
    Slide,
}

impl MovementType {
    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            MovementType::Walk => 0,
            MovementType::Fly => 1,
            MovementType::Slide => 2,
        }
    }

    #[inline]
    pub fn is_flying(self) -> bool {
        self == MovementType::Fly
    }
}

/// The side a unit fights for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    #[default]
    Player,
    Hostile,
    Neutral,
}

/// Stable identifier of a unit for the duration of a battle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
