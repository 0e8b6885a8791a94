use battlescape_core::{Position, UnitId};
use thiserror::Error;

/// Errors returned when parsing a [`Layout`](crate::Layout) level plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("level plan is empty")]
    Empty,

    #[error("level {level}, row {row}: expected {expected} columns, found {found}")]
    RaggedRow {
        level: i32,
        row: i32,
        expected: i32,
        found: i32,
    },

    #[error("level {level} has {found} rows, level 0 has {expected}")]
    LevelSizeMismatch { level: i32, expected: i32, found: i32 },

    #[error("unknown glyph {ch:?} at {pos}")]
    UnknownGlyph { ch: char, pos: Position },
}

/// Errors returned when putting a unit on a [`BattleMap`](crate::BattleMap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("footprint tile {0} is outside the map")]
    OutOfBounds(Position),

    #[error("tile {pos} is already occupied by unit {by}")]
    Occupied { pos: Position, by: UnitId },
}
