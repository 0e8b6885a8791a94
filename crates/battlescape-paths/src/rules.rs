//! Blocking rules: walls, bigwalls, doors, occupants and vertical moves.

use battlescape_core::{
    Battlefield, BigWall, Direction, Faction, Footprint, IMPOSSIBLE, InputState, MovementType,
    Mover, Occupant, Position, Tile, TilePart, UnitId,
};

/// How a straight up/down step can be made, if at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalMove {
    Blocked,
    /// Flight through open floor or ceiling.
    Flying,
    /// A gravlift pad on both levels; works for every movement type.
    Gravlift,
}

impl VerticalMove {
    #[inline]
    pub fn is_allowed(self) -> bool {
        self != VerticalMove::Blocked
    }
}

/// Whether every tile of the `size × size` footprint at `pos` lacks support
/// and is above the ground level.
pub fn can_fall_down<F: Battlefield + ?Sized>(field: &F, pos: Position, size: i32) -> bool {
    Footprint::new(size).offsets().all(|off| {
        let p = pos + off;
        p.z > 0
            && field
                .tile(p)
                .is_some_and(|t| t.has_no_floor(field.tile_below(p)))
    })
}

/// A swinging door (not a UFO door) in the given wall slot.
pub(crate) fn has_swing_door(tile: &Tile, part: TilePart) -> bool {
    tile.part(part).is_some_and(|p| p.door)
}

/// Everything the blocking and cost rules need to know about one search.
pub(crate) struct Rules<'a, F: ?Sized, U: ?Sized> {
    pub field: &'a F,
    pub unit: &'a U,
    pub movement: MovementType,
    pub missile_target: Option<UnitId>,
    pub input: InputState,
}

impl<F: Battlefield + ?Sized, U: Mover + ?Sized> Rules<'_, F, U> {
    /// Whether `part` of the tile at `pos` stops the unit. Missing tiles
    /// always block.
    pub fn part_blocked(&self, pos: Position, part: TilePart) -> bool {
        let Some(tile) = self.field.tile(pos) else {
            return true;
        };
        match part {
            TilePart::WestWall => {
                if matches!(tile.big_wall(), BigWall::West | BigWall::WestAndNorth) {
                    return true;
                }
                let Some(west) = self.field.tile(pos.shift(-1, 0, 0)) else {
                    return true;
                };
                if matches!(west.big_wall(), BigWall::East | BigWall::EastAndSouth) {
                    return true;
                }
            }
            TilePart::NorthWall => {
                if matches!(tile.big_wall(), BigWall::North | BigWall::WestAndNorth) {
                    return true;
                }
                let Some(north) = self.field.tile(pos.shift(0, -1, 0)) else {
                    return true;
                };
                if matches!(north.big_wall(), BigWall::South | BigWall::EastAndSouth) {
                    return true;
                }
            }
            TilePart::Floor => match tile.occupant {
                Some(occ) => {
                    if let Some(verdict) = self.occupant_verdict(&occ) {
                        return verdict;
                    }
                }
                None => {
                    if !self.movement.is_flying()
                        && tile.has_no_floor(None)
                        && self.would_land_badly(pos)
                    {
                        return true;
                    }
                }
            },
            TilePart::Object => {}
        }

        // Missiles do not open doors.
        if self.missile_target.is_some()
            && tile
                .part(part)
                .is_some_and(|p| p.door || (p.ufo_door && !tile.is_ufo_door_open(part)))
        {
            return true;
        }
        tile.tu_cost(part, self.movement) == IMPOSSIBLE
    }

    /// `Some(blocked)` when the occupant alone decides the floor's fate.
    fn occupant_verdict(&self, occ: &Occupant) -> Option<bool> {
        if occ.id == self.unit.id() || Some(occ.id) == self.missile_target || occ.out {
            return Some(false);
        }
        if self.missile_target.is_some() && occ.faction == Faction::Hostile {
            return Some(true);
        }
        let me = self.unit.faction();
        if me == Faction::Player && occ.visible {
            return Some(true);
        }
        if me == occ.faction {
            return Some(true);
        }
        if me == Faction::Hostile && self.unit.has_spotted(occ.id) {
            return Some(true);
        }
        None
    }

    /// Large units never fall onto others, and nobody falls onto a large
    /// unit.
    fn would_land_badly(&self, pos: Position) -> bool {
        let me = self.unit.id();
        let mut p = pos;
        while p.z >= 0 {
            let Some(t) = self.field.tile(p) else {
                break;
            };
            match t.occupant {
                Some(u) if u.id != me => {
                    if self.unit.size() > 1 {
                        return true;
                    }
                    if Some(u.id) != self.missile_target && !u.out && u.size > 1 {
                        return true;
                    }
                }
                _ => {}
            }
            if !t.has_no_floor(None) {
                break;
            }
            p = p.below();
        }
        false
    }

    /// Whether the tile at `pos` holds a diagonal-blocking bigwall other
    /// than `exclusion`.
    pub fn big_wall_blocked(&self, pos: Position, exclusion: BigWall) -> bool {
        match self.field.tile(pos) {
            Some(t) => {
                let bw = t.big_wall();
                bw.is_diagonal_blocker() && bw != exclusion
            }
            None => true,
        }
    }

    /// Whether walls, bigwalls or doors stop a step from `from` in `dir`.
    /// Vertical steps are never wall-blocked.
    pub fn step_blocked(&self, from: Position, dir: Direction) -> bool {
        use Direction::*;
        use TilePart::{NorthWall, WestWall};

        let n = from.shift(0, -1, 0);
        let e = from.shift(1, 0, 0);
        let s = from.shift(0, 1, 0);
        let w = from.shift(-1, 0, 0);
        match dir {
            North => self.part_blocked(from, NorthWall),
            NorthEast => {
                self.part_blocked(from, NorthWall)
                    || self.part_blocked(n.shift(1, 0, 0), WestWall)
                    || self.part_blocked(e, WestWall)
                    || self.part_blocked(e, NorthWall)
                    || self.big_wall_blocked(e, BigWall::Nesw)
                    || self.big_wall_blocked(n, BigWall::Nesw)
            }
            East => self.part_blocked(e, WestWall),
            SouthEast => {
                self.part_blocked(e, WestWall)
                    || self.part_blocked(s, NorthWall)
                    || self.part_blocked(s.shift(1, 0, 0), NorthWall)
                    || self.part_blocked(s.shift(1, 0, 0), WestWall)
                    || self.big_wall_blocked(e, BigWall::Nwse)
                    || self.big_wall_blocked(s, BigWall::Nwse)
            }
            South => self.part_blocked(s, NorthWall),
            SouthWest => {
                self.part_blocked(from, WestWall)
                    || self.part_blocked(s, WestWall)
                    || self.part_blocked(s, NorthWall)
                    || self.part_blocked(s.shift(-1, 0, 0), NorthWall)
                    || self.big_wall_blocked(s, BigWall::Nesw)
                    || self.big_wall_blocked(w, BigWall::Nesw)
            }
            West => self.part_blocked(from, WestWall),
            NorthWest => {
                self.part_blocked(from, WestWall)
                    || self.part_blocked(from, NorthWall)
                    || self.part_blocked(w, NorthWall)
                    || self.part_blocked(n, WestWall)
                    || self.big_wall_blocked(n, BigWall::Nwse)
                    || self.big_wall_blocked(w, BigWall::Nwse)
            }
            Up | Down => false,
        }
    }

    /// Whether a straight up/down step from `start` is possible.
    pub fn validate_up_down(&self, start: Position, dir: Direction) -> VerticalMove {
        let dest_pos = start + dir.to_vector();
        let (Some(here), Some(dest)) = (self.field.tile(start), self.field.tile(dest_pos)) else {
            return VerticalMove::Blocked;
        };
        if here.is_grav_lift() && dest.is_grav_lift() {
            return VerticalMove::Gravlift;
        }
        if self.movement.is_flying() && !self.input.suppress_vertical_flight {
            let open = match dir {
                Direction::Up => dest.has_no_floor(Some(here)),
                Direction::Down => here.has_no_floor(Some(dest)),
                _ => false,
            };
            if open {
                return VerticalMove::Flying;
            }
        }
        VerticalMove::Blocked
    }
}
