//! Battlefields built from text.
//!
//! A [`Layout`] is a stack of ASCII level plans, ground level first. Levels
//! are separated by blank lines; every level must have the same number of
//! rows and every row the same number of columns. Leading and trailing
//! whitespace on each row is ignored so plans can be indented in source.
//!
//! | Glyph | Tile |
//! |---|---|
//! | `.` | floor |
//! | `_` | open air (no floor) |
//! | `x` | impassable floor |
//! | `#` | floor with a solid block |
//! | `\|` `-` `L` | floor with a west, north, or west and north wall |
//! | `d` `D` | floor with a door in the west / north wall |
//! | `u` `U` | floor with a UFO door in the west / north wall |
//! | `/` `\` | floor with a NE-SW / NW-SE diagonal bigwall |
//! | `1` `2` `3` | floor with a stair step at terrain level -8 / -16 / -24 |
//! | `g` | gravlift floor |
//! | `f` | burning floor |

use std::fmt;
use std::str::FromStr;

use battlescape_core::{
    BigWall, IMPOSSIBLE, PartData, Position, PreviewSurface, STAIRS_TOP, Tile, TilePart, Volume,
};

use crate::error::LayoutError;
use crate::grid::BattleMap;

/// Walking cost of every floor a layout creates.
pub const FLOOR_COST: i32 = 4;

/// TU cost of passing through a closed door.
pub const DOOR_COST: i32 = 4;

/// Every glyph a level plan may contain.
pub const LEGEND: &str = "._x#|-LdDuU/\\123gf";

/// A parsed multi-level plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    volume: Volume,
    glyphs: Vec<char>,
}

impl Layout {
    /// Parse a plan. See the module documentation for the format.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let mut levels: Vec<Vec<Vec<char>>> = Vec::new();
        let mut current: Vec<Vec<char>> = Vec::new();
        for line in s.lines() {
            let row = line.trim();
            if row.is_empty() {
                if !current.is_empty() {
                    levels.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.push(row.chars().collect());
        }
        if !current.is_empty() {
            levels.push(current);
        }

        let Some(first) = levels.first() else {
            return Err(LayoutError::Empty);
        };
        let length = first.len() as i32;
        let width = first[0].len() as i32;

        let mut glyphs = Vec::with_capacity((width * length) as usize * levels.len());
        for (z, level) in levels.iter().enumerate() {
            let z = z as i32;
            if level.len() as i32 != length {
                return Err(LayoutError::LevelSizeMismatch {
                    level: z,
                    expected: length,
                    found: level.len() as i32,
                });
            }
            for (y, row) in level.iter().enumerate() {
                let y = y as i32;
                if row.len() as i32 != width {
                    return Err(LayoutError::RaggedRow {
                        level: z,
                        row: y,
                        expected: width,
                        found: row.len() as i32,
                    });
                }
                for (x, &ch) in row.iter().enumerate() {
                    if !LEGEND.contains(ch) {
                        return Err(LayoutError::UnknownGlyph {
                            ch,
                            pos: Position::new(x as i32, y, z),
                        });
                    }
                    glyphs.push(ch);
                }
            }
        }

        Ok(Self {
            volume: Volume::new(width, length, levels.len() as i32),
            glyphs,
        })
    }

    /// Size of the plan.
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// The glyph at `pos`.
    pub fn glyph(&self, pos: Position) -> Option<char> {
        self.volume.index(pos).map(|i| self.glyphs[i])
    }

    /// Every position with its glyph, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.volume.iter().zip(self.glyphs.iter().copied())
    }

    /// Build a battlefield from the plan.
    pub fn build(&self) -> BattleMap {
        let mut map = BattleMap::new(self.volume);
        for (pos, ch) in self.iter() {
            if let Some(t) = map.tile_mut(pos) {
                *t = glyph_tile(ch);
            }
        }
        map
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.volume.width().max(1) as usize;
        let per_level = w * self.volume.length().max(0) as usize;
        for (z, level) in self.glyphs.chunks(per_level.max(1)).enumerate() {
            if z > 0 {
                writeln!(f)?;
            }
            for row in level.chunks(w) {
                let line: String = row.iter().collect();
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

fn floor() -> PartData {
    PartData::uniform(FLOOR_COST)
}

fn wall() -> PartData {
    PartData::uniform(IMPOSSIBLE)
}

fn door(ufo: bool) -> PartData {
    let mut d = PartData::uniform(DOOR_COST);
    d.door = !ufo;
    d.ufo_door = ufo;
    d
}

fn big_wall(shape: BigWall) -> PartData {
    let mut o = PartData::uniform(IMPOSSIBLE);
    o.big_wall = shape;
    o
}

fn stair(level: i32) -> PartData {
    let mut o = PartData::uniform(0);
    o.terrain_level = level;
    o
}

/// The tile a glyph stands for. Unknown glyphs give an empty tile.
pub fn glyph_tile(ch: char) -> Tile {
    let ground = Tile::new().with_part(TilePart::Floor, floor());
    match ch {
        '.' => ground,
        'x' => Tile::new().with_part(TilePart::Floor, wall()),
        '#' => ground.with_part(TilePart::Object, big_wall(BigWall::Block)),
        '|' => ground.with_part(TilePart::WestWall, wall()),
        '-' => ground.with_part(TilePart::NorthWall, wall()),
        'L' => ground
            .with_part(TilePart::WestWall, wall())
            .with_part(TilePart::NorthWall, wall()),
        'd' => ground.with_part(TilePart::WestWall, door(false)),
        'D' => ground.with_part(TilePart::NorthWall, door(false)),
        'u' => ground.with_part(TilePart::WestWall, door(true)),
        'U' => ground.with_part(TilePart::NorthWall, door(true)),
        '/' => ground.with_part(TilePart::Object, big_wall(BigWall::Nesw)),
        '\\' => ground.with_part(TilePart::Object, big_wall(BigWall::Nwse)),
        '1' => ground.with_part(TilePart::Object, stair(-8)),
        '2' => ground.with_part(TilePart::Object, stair(-16)),
        '3' => ground.with_part(TilePart::Object, stair(STAIRS_TOP)),
        'g' => {
            let mut lift = floor();
            lift.grav_lift = true;
            Tile::new().with_part(TilePart::Floor, lift)
        }
        'f' => {
            let mut t = ground;
            t.fire = 1;
            t
        }
        _ => Tile::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battlescape_core::{Battlefield, MovementType};

    const TWO_LEVELS: &str = "
        ....
        .#..
        ..g.

        ____
        ____
        __g_
    ";

    #[test]
    fn parse_levels() {
        let l = Layout::parse(TWO_LEVELS).unwrap();
        assert_eq!(l.volume(), Volume::new(4, 3, 2));
        assert_eq!(l.glyph(Position::new(1, 1, 0)), Some('#'));
        assert_eq!(l.glyph(Position::new(2, 2, 1)), Some('g'));
        assert_eq!(l.glyph(Position::new(4, 0, 0)), None);
    }

    #[test]
    fn from_str_matches_parse() {
        let a: Layout = "..\n..".parse().unwrap();
        assert_eq!(a, Layout::parse("..\n..").unwrap());
    }

    #[test]
    fn display_round_trip() {
        let l = Layout::parse(TWO_LEVELS).unwrap();
        let again = Layout::parse(&l.to_string()).unwrap();
        assert_eq!(l, again);
    }

    #[test]
    fn build_tiles() {
        let map = Layout::parse(TWO_LEVELS).unwrap().build();
        let block = map.tile(Position::new(1, 1, 0)).unwrap();
        assert_eq!(block.big_wall(), BigWall::Block);
        let lift = map.tile(Position::new(2, 2, 1)).unwrap();
        assert!(lift.is_grav_lift());
        let air = Position::new(0, 0, 1);
        assert!(map.tile(air).unwrap().has_no_floor(map.tile_below(air)));
    }

    #[test]
    fn glyph_costs() {
        let t = glyph_tile('.');
        assert_eq!(t.tu_cost(TilePart::Floor, MovementType::Walk), FLOOR_COST);
        let t = glyph_tile('x');
        assert_eq!(t.tu_cost(TilePart::Floor, MovementType::Walk), IMPOSSIBLE);
        let t = glyph_tile('d');
        assert!(t.has_door(TilePart::WestWall));
        assert!(!t.has_door(TilePart::NorthWall));
        let t = glyph_tile('3');
        assert_eq!(t.terrain_level(), STAIRS_TOP);
        assert_eq!(glyph_tile('f').fire, 1);
    }

    #[test]
    fn every_legend_glyph_parses() {
        let l = Layout::parse(LEGEND).unwrap();
        assert_eq!(l.volume().len(), LEGEND.chars().count());
    }

    #[test]
    fn empty_plan() {
        assert_eq!(Layout::parse("  \n\n "), Err(LayoutError::Empty));
    }

    #[test]
    fn ragged_row() {
        let err = Layout::parse("...\n..\n...").unwrap_err();
        assert_eq!(
            err,
            LayoutError::RaggedRow {
                level: 0,
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn level_size_mismatch() {
        let err = Layout::parse("..\n..\n\n..").unwrap_err();
        assert_eq!(
            err,
            LayoutError::LevelSizeMismatch {
                level: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn unknown_glyph() {
        let err = Layout::parse("..\n.?").unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownGlyph {
                ch: '?',
                pos: Position::new(1, 1, 0)
            }
        );
        assert!(err.to_string().contains("'?'"));
    }
}
