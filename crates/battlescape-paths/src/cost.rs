//! The per-step time-unit cost function.
//!
//! Besides pricing a step, it corrects the destination: a unit on a stair
//! top climbs to the next level, a unit stepping off an edge onto a low
//! surface lands one level down, and a unit with nothing under it falls.

use battlescape_core::{
    Battlefield, Direction, Faction, IMPOSSIBLE, MovementType, Mover, Position, Tile, TilePart,
};

use crate::rules::{Rules, VerticalMove, can_fall_down, has_swing_door};

/// Cost of any straight up/down step (flight or gravlift).
pub const VERTICAL_MOVE_COST: i32 = 8;
/// Base cost of stepping onto a tile without a floor.
pub const NO_FLOOR_COST: i32 = 4;
/// Surcharge for climbing onto the next level.
pub const STAIRS_CLIMB_COST: i32 = 1;
/// Soft cost steering AI units around burning tiles.
pub const FIRE_AVOIDANCE_COST: i32 = 32;
/// Extra cost for everybody entering a burning tile.
pub const FIRE_SURCHARGE: i32 = 2;
/// Largest terrain level difference a single step can overcome.
pub const MAX_STEP_HEIGHT: i32 = 8;

const CLIMB_LEVEL: i32 = -16;
const STEP_DOWN_LEVEL: i32 = -12;
const FLYING_HEADROOM: i32 = 26;

/// A priced step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StepCost {
    /// TU cost, [`IMPOSSIBLE`] when the step cannot be made.
    pub cost: i32,
    /// Where the step actually ends.
    pub destination: Position,
    /// The step actually taken; [`Direction::Down`] for a fall.
    pub direction: Direction,
}

impl StepCost {
    fn blocked(destination: Position, direction: Direction) -> Self {
        Self {
            cost: IMPOSSIBLE,
            destination,
            direction,
        }
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.cost >= IMPOSSIBLE
    }
}

/// Mutable flags the cost function updates as a side effect.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StepState {
    /// Strafing requested for the current order. Cleared when a vehicle
    /// would have to strafe outside its forward arc.
    pub strafe_move: bool,
    /// Cost of the most expensive closed door crossed by the last step.
    pub open_door: i32,
}

#[derive(Default)]
struct WallTally {
    cost: i32,
    sides: i32,
    open_door: i32,
}

impl WallTally {
    fn cross(&mut self, tile: &Tile, part: TilePart, mt: MovementType) {
        let c = tile.tu_cost(part, mt);
        if c <= 0 {
            return;
        }
        self.cost += c;
        self.sides += 1;
        if tile.has_door(part) {
            self.open_door = self.open_door.max(c);
        }
    }
}

impl<F: Battlefield + ?Sized, U: Mover + ?Sized> Rules<'_, F, U> {
    /// Price one step of the unit from `start` in `dir`.
    ///
    /// Every tile of the unit's footprint is checked and priced; the result
    /// is the average over the footprint, rounded up. In missile mode any
    /// unblocked step costs 0.
    pub fn step_cost(
        &self,
        start: Position,
        dir: Direction,
        state: &mut StepState,
        missile: bool,
    ) -> StepCost {
        use Direction::*;

        state.open_door = 0;
        let fp = self.unit.footprint();
        let n = fp.side();
        let mt = self.movement;
        let flying = mt.is_flying();

        let mut dir = dir;
        let mut end = start + dir.to_vector();
        let mut fell_down = false;
        if !flying && can_fall_down(self.field, start, n) {
            dir = Down;
            end = start.below();
            fell_down = true;
        }
        let horizontal = dir.is_horizontal();
        let planned_z = end.z;

        let mut climbed = false;
        let mut parts_up = 0;
        let mut parts_down = 0;
        let mut total = 0;

        for off in fp.offsets() {
            let from_pos = start + off;
            let Some(start_tile) = self.field.tile(from_pos) else {
                return StepCost::blocked(end, dir);
            };
            let Some(mut dest_tile) = self.field.tile(end + off) else {
                return StepCost::blocked(end, dir);
            };

            // Large units cannot squeeze their far corner past a door.
            if off.x > 0
                && off.y > 0
                && (has_swing_door(dest_tile, TilePart::NorthWall)
                    || has_swing_door(dest_tile, TilePart::WestWall))
            {
                return StepCost::blocked(end, dir);
            }

            let above_has_floor = self
                .field
                .tile((end + off).above())
                .is_some_and(|above| !above.has_no_floor(Some(dest_tile)));
            if horizontal && !climbed && start_tile.terrain_level() <= CLIMB_LEVEL && above_has_floor
            {
                parts_up += 1;
                if parts_up >= n {
                    end.z += 1;
                    climbed = true;
                    let Some(t) = self.field.tile(end + off) else {
                        return StepCost::blocked(end, dir);
                    };
                    dest_tile = t;
                }
            } else if !fell_down
                && !flying
                && self.unsupported(end + off)
                && self
                    .field
                    .tile_below(end + off)
                    .is_some_and(|below| below.terrain_level() <= STEP_DOWN_LEVEL)
            {
                parts_down += 1;
                if parts_down == fp.cells() {
                    end.z -= 1;
                    fell_down = true;
                    let Some(t) = self.field.tile(end + off) else {
                        return StepCost::blocked(end, dir);
                    };
                    dest_tile = t;
                }
            } else if flying && self.no_headroom(end + off) {
                return StepCost::blocked(end, dir);
            }

            let from_pos = if climbed { from_pos.above() } else { from_pos };
            let Some(from_tile) = self.field.tile(from_pos) else {
                return StepCost::blocked(end, dir);
            };

            let mut cost = 0;
            if horizontal {
                if self.step_blocked(from_pos, dir) {
                    return StepCost::blocked(end, dir);
                }
                if end.z >= planned_z
                    && from_tile.terrain_level() - dest_tile.terrain_level() > MAX_STEP_HEIGHT
                {
                    return StepCost::blocked(end, dir);
                }
            } else if !fell_down {
                if self.validate_up_down(from_pos, dir) == VerticalMove::Blocked {
                    return StepCost::blocked(end, dir);
                }
                cost = VERTICAL_MOVE_COST;
            }

            if self.part_blocked(end + off, TilePart::Floor)
                || self.part_blocked(end + off, TilePart::Object)
            {
                return StepCost::blocked(end, dir);
            }

            if horizontal {
                if !fell_down && dest_tile.has_no_floor(None) {
                    cost = NO_FLOOR_COST;
                }
                cost += dest_tile.tu_cost(TilePart::Floor, mt);
                if !fell_down && !climbed {
                    cost += dest_tile.tu_cost(TilePart::Object, mt);
                }
                if climbed {
                    cost += STAIRS_CLIMB_COST;
                }
            }

            let mut walls = WallTally::default();
            if matches!(dir, North | NorthEast | NorthWest) {
                walls.cross(from_tile, TilePart::NorthWall, mt);
            }
            if !fell_down && matches!(dir, East | NorthEast | SouthEast) {
                walls.cross(dest_tile, TilePart::WestWall, mt);
            }
            if !fell_down && matches!(dir, South | SouthEast | SouthWest) {
                walls.cross(dest_tile, TilePart::NorthWall, mt);
            }
            if matches!(dir, West | SouthWest | NorthWest) {
                walls.cross(from_tile, TilePart::WestWall, mt);
            }
            state.open_door = state.open_door.max(walls.open_door);

            if dir.is_diagonal() {
                cost = cost * 3 / 2;
                if walls.sides > 0 {
                    let round_up = (walls.cost - walls.sides) % 2 == 1;
                    walls.cost = walls.cost / 2 + i32::from(round_up);
                }
            }
            cost += walls.cost;

            if dest_tile.fire > 0 && !self.unit.is_fire_immune() {
                if self.unit.faction() != Faction::Player {
                    cost += FIRE_AVOIDANCE_COST;
                }
                cost += FIRE_SURCHARGE;
            }

            if state.strafe_move && horizontal {
                let delta = self.unit.facing().angular_distance(dir);
                if self.unit.is_vehicle() && delta > 1 {
                    state.strafe_move = false;
                } else {
                    cost += delta.min(2);
                }
            }

            total += cost;
        }

        if fp.is_large() {
            let cells = fp.cells();
            total = (total + cells - 1) / cells;

            // The unit must be able to turn inside its own footprint.
            let far = end + fp.far_corner();
            if self.step_blocked(far, NorthWest)
                || self.step_blocked(end.shift(n - 1, 0, 0), SouthWest)
            {
                return StepCost::blocked(end, dir);
            }

            let mut lo = i32::MAX;
            let mut hi = i32::MIN;
            for off in fp.offsets() {
                let Some(t) = self.field.tile(end + off) else {
                    return StepCost::blocked(end, dir);
                };
                lo = lo.min(t.terrain_level());
                hi = hi.max(t.terrain_level());
            }
            if hi - lo > MAX_STEP_HEIGHT {
                return StepCost::blocked(end, dir);
            }

            // Level changes are all or nothing.
            if (parts_up > 0 || parts_down > 0) && end.z == planned_z {
                return StepCost::blocked(end, dir);
            }
        }

        StepCost {
            cost: if missile { 0 } else { total },
            destination: end,
            direction: dir,
        }
    }

    /// Whether nothing holds a unit up at `pos`.
    fn unsupported(&self, pos: Position) -> bool {
        pos.z > 0
            && self
                .field
                .tile(pos)
                .is_some_and(|t| t.has_no_floor(self.field.tile_below(pos)))
    }

    /// Whether the unit below `pos` pokes too far into it for a flyer.
    fn no_headroom(&self, pos: Position) -> bool {
        let Some(below) = self.field.tile_below(pos) else {
            return false;
        };
        match below.occupant {
            Some(occ) if occ.id != self.unit.id() => {
                occ.height + occ.float_height - below.terrain_level() > FLYING_HEADROOM
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battlescape_core::{InputState, UnitId};
    use battlescape_map::{BattleMap, DOOR_COST, FLOOR_COST, Layout, Soldier};

    fn p(x: i32, y: i32, z: i32) -> Position {
        Position::new(x, y, z)
    }

    fn price(map: &BattleMap, unit: &Soldier, start: Position, dir: Direction) -> StepCost {
        let rules = Rules {
            field: map,
            unit,
            movement: unit.movement,
            missile_target: None,
            input: InputState::NONE,
        };
        let mut state = StepState::default();
        rules.step_cost(start, dir, &mut state, false)
    }

    fn open(w: usize, h: usize) -> BattleMap {
        let row = ".".repeat(w);
        let plan = vec![row; h].join("\n");
        Layout::parse(&plan).unwrap().build()
    }

    #[test]
    fn cardinal_step_costs_the_floor() {
        let map = open(5, 5);
        let unit = Soldier::new(1, p(2, 2, 0));
        for dir in [Direction::North, Direction::East, Direction::South, Direction::West] {
            let s = price(&map, &unit, p(2, 2, 0), dir);
            assert_eq!(s.cost, FLOOR_COST);
            assert_eq!(s.destination, p(2, 2, 0) + dir.to_vector());
            assert_eq!(s.direction, dir);
        }
    }

    #[test]
    fn diagonal_step_costs_half_again() {
        let map = open(5, 5);
        let unit = Soldier::new(1, p(2, 2, 0));
        let s = price(&map, &unit, p(2, 2, 0), Direction::NorthEast);
        assert_eq!(s.cost, FLOOR_COST * 3 / 2);
    }

    #[test]
    fn leaving_the_map_is_impossible() {
        let map = open(3, 3);
        let unit = Soldier::new(1, p(0, 0, 0));
        assert!(price(&map, &unit, p(0, 0, 0), Direction::West).is_blocked());
        assert!(price(&map, &unit, p(0, 0, 0), Direction::North).is_blocked());
        assert!(price(&map, &unit, p(0, 0, 0), Direction::Up).is_blocked());
    }

    #[test]
    fn impassable_floor_blocks() {
        let map = Layout::parse(".x.").unwrap().build();
        let unit = Soldier::new(1, p(0, 0, 0));
        assert_eq!(price(&map, &unit, p(0, 0, 0), Direction::East).cost, IMPOSSIBLE);
    }

    #[test]
    fn doors_cost_and_are_remembered() {
        let map = Layout::parse(".d.").unwrap().build();
        let unit = Soldier::new(1, p(0, 0, 0));
        let rules = Rules {
            field: &map,
            unit: &unit,
            movement: unit.movement,
            missile_target: None,
            input: InputState::NONE,
        };
        let mut state = StepState::default();
        let s = rules.step_cost(p(0, 0, 0), Direction::East, &mut state, false);
        assert_eq!(s.cost, FLOOR_COST + DOOR_COST);
        assert_eq!(state.open_door, DOOR_COST);

        let s = rules.step_cost(p(1, 0, 0), Direction::East, &mut state, false);
        assert_eq!(s.cost, FLOOR_COST);
        assert_eq!(state.open_door, 0);
    }

    #[test]
    fn diagonal_wall_cost_is_shared() {
        // A door in the north wall of (1,1); stepping NE from (1,1) crosses
        // it on one side only.
        let map = Layout::parse(
            "
            ...
            .D.
            ...
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(1, 1, 0));
        let s = price(&map, &unit, p(1, 1, 0), Direction::NorthEast);
        // floor 4 * 1.5 = 6; wall 4 over one side: 4 / 2 + ((4 - 1) % 2) = 3.
        assert_eq!(s.cost, 6 + 3);
    }

    #[test]
    fn fire_costs_more_for_ai() {
        let map = Layout::parse(".f").unwrap().build();
        let soldier = Soldier::new(1, p(0, 0, 0));
        let s = price(&map, &soldier, p(0, 0, 0), Direction::East);
        assert_eq!(s.cost, FLOOR_COST + FIRE_SURCHARGE);

        let alien = Soldier::new(2, p(0, 0, 0)).with_faction(Faction::Hostile);
        let s = price(&map, &alien, p(0, 0, 0), Direction::East);
        assert_eq!(s.cost, FLOOR_COST + FIRE_SURCHARGE + FIRE_AVOIDANCE_COST);

        let mut immune = Soldier::new(3, p(0, 0, 0)).with_faction(Faction::Hostile);
        immune.fire_immune = true;
        let s = price(&map, &immune, p(0, 0, 0), Direction::East);
        assert_eq!(s.cost, FLOOR_COST);
    }

    #[test]
    fn climbing_stairs_moves_up_a_level() {
        let map = Layout::parse(
            "
            .123

            ____
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(0, 0, 0));
        // Gentle steps stay on the level.
        let s = price(&map, &unit, p(0, 0, 0), Direction::East);
        assert_eq!(s.destination, p(1, 0, 0));
        assert_eq!(s.cost, FLOOR_COST);
        let s = price(&map, &unit, p(1, 0, 0), Direction::East);
        assert_eq!(s.destination, p(2, 0, 0));
        // From the upper step the unit climbs onto the level above.
        let s = price(&map, &unit, p(2, 0, 0), Direction::East);
        assert_eq!(s.destination, p(3, 0, 1));
        assert_eq!(s.direction, Direction::East);
        assert_eq!(s.cost, NO_FLOOR_COST + STAIRS_CLIMB_COST);
        // Too steep to walk straight onto the stair top.
        let flat = Layout::parse(".3").unwrap().build();
        assert!(price(&flat, &unit, p(0, 0, 0), Direction::East).is_blocked());
    }

    #[test]
    fn unsupported_unit_falls() {
        let map = Layout::parse(
            "
            ...

            ._.
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(1, 0, 1));
        let s = price(&map, &unit, p(1, 0, 1), Direction::East);
        assert_eq!(s.direction, Direction::Down);
        assert_eq!(s.destination, p(1, 0, 0));
        assert_eq!(s.cost, 0);

        let flyer = Soldier::new(2, p(1, 0, 1)).with_movement(MovementType::Fly);
        let s = price(&map, &flyer, p(1, 0, 1), Direction::East);
        assert_eq!(s.direction, Direction::East);
        assert_eq!(s.destination, p(2, 0, 1));
    }

    #[test]
    fn stepping_off_onto_a_low_surface() {
        // The upper level edge overlooks a raised stair step below.
        let map = Layout::parse(
            "
            .2

            ._
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(0, 0, 1));
        let s = price(&map, &unit, p(0, 0, 1), Direction::East);
        assert_eq!(s.destination, p(1, 0, 0));
        assert_eq!(s.direction, Direction::East);
        assert_eq!(s.cost, FLOOR_COST);
    }

    #[test]
    fn walking_into_open_air_costs_the_no_floor_rate() {
        let map = Layout::parse(
            "
            ...

            ._.
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(0, 0, 1));
        let s = price(&map, &unit, p(0, 0, 1), Direction::East);
        assert_eq!(s.destination, p(1, 0, 1));
        assert_eq!(s.cost, NO_FLOOR_COST);
    }

    #[test]
    fn gravlift_costs_eight_for_walkers() {
        let map = Layout::parse(
            "
            g

            g
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(0, 0, 0));
        let s = price(&map, &unit, p(0, 0, 0), Direction::Up);
        assert_eq!(s.cost, VERTICAL_MOVE_COST);
        assert_eq!(s.destination, p(0, 0, 1));
        let s = price(&map, &unit, p(0, 0, 1), Direction::Down);
        assert_eq!(s.cost, VERTICAL_MOVE_COST);
    }

    #[test]
    fn flyers_need_headroom() {
        let mut map = Layout::parse(
            "
            ..

            __
            ",
        )
        .unwrap()
        .build();
        let mut tall = Soldier::new(2, p(1, 0, 0));
        tall.height = 24;
        tall.float_height = 4;
        map.place(&tall).unwrap();
        let flyer = Soldier::new(1, p(0, 0, 1)).with_movement(MovementType::Fly);
        assert!(price(&map, &flyer, p(0, 0, 1), Direction::East).is_blocked());

        map.remove_unit(tall.id);
        tall.float_height = 0;
        map.place(&tall).unwrap();
        assert!(!price(&map, &flyer, p(0, 0, 1), Direction::East).is_blocked());
    }

    #[test]
    fn strafing_adds_turn_cost() {
        let map = open(5, 5);
        let unit = Soldier::new(1, p(2, 2, 0)).with_facing(Direction::North);
        let rules = Rules {
            field: &map,
            unit: &unit,
            movement: unit.movement,
            missile_target: None,
            input: InputState::NONE,
        };
        let mut state = StepState {
            strafe_move: true,
            open_door: 0,
        };
        let ahead = rules.step_cost(p(2, 2, 0), Direction::North, &mut state, false);
        assert_eq!(ahead.cost, FLOOR_COST);
        let side = rules.step_cost(p(2, 2, 0), Direction::East, &mut state, false);
        assert_eq!(side.cost, FLOOR_COST + 2);
        let back = rules.step_cost(p(2, 2, 0), Direction::South, &mut state, false);
        assert_eq!(back.cost, FLOOR_COST + 2);
        assert!(state.strafe_move);
    }

    #[test]
    fn vehicles_only_strafe_forward() {
        let map = open(5, 5);
        let tank = Soldier::new(1, p(2, 2, 0))
            .with_facing(Direction::North)
            .vehicle();
        let rules = Rules {
            field: &map,
            unit: &tank,
            movement: tank.movement,
            missile_target: None,
            input: InputState::NONE,
        };
        let mut state = StepState {
            strafe_move: true,
            open_door: 0,
        };
        let s = rules.step_cost(p(2, 2, 0), Direction::NorthEast, &mut state, false);
        assert_eq!(s.cost, FLOOR_COST * 3 / 2 + 1);
        assert!(state.strafe_move);
        rules.step_cost(p(2, 2, 0), Direction::East, &mut state, false);
        assert!(!state.strafe_move);
    }

    #[test]
    fn missile_steps_are_free() {
        let map = open(3, 3);
        let unit = Soldier::new(1, p(0, 0, 0));
        let rules = Rules {
            field: &map,
            unit: &unit,
            movement: MovementType::Fly,
            missile_target: Some(UnitId(9)),
            input: InputState::NONE,
        };
        let mut state = StepState::default();
        let s = rules.step_cost(p(0, 0, 0), Direction::East, &mut state, true);
        assert_eq!(s.cost, 0);
        assert!(!s.is_blocked());
    }

    #[test]
    fn large_unit_average_cost() {
        let map = open(5, 5);
        let big = Soldier::new(1, p(1, 1, 0)).with_size(2);
        let s = price(&map, &big, p(1, 1, 0), Direction::East);
        assert_eq!(s.cost, FLOOR_COST);
        let s = price(&map, &big, p(1, 1, 0), Direction::SouthEast);
        assert_eq!(s.cost, FLOOR_COST * 3 / 2);
        // The far edge of the map stops the footprint.
        assert!(price(&map, &big, p(3, 1, 0), Direction::East).is_blocked());
    }

    #[test]
    fn large_unit_far_corner_door() {
        // Door in the west wall of (3,2): the far corner of a 2x2 unit moving
        // to (2,1).
        let map = Layout::parse(
            "
            .....
            .....
            ...d.
            .....
            ",
        )
        .unwrap()
        .build();
        let big = Soldier::new(1, p(1, 1, 0)).with_size(2);
        assert!(price(&map, &big, p(1, 1, 0), Direction::East).is_blocked());
        // Away from the door the unit moves freely.
        assert!(!price(&map, &big, p(1, 0, 0), Direction::West).is_blocked());
    }

    #[test]
    fn large_unit_cannot_step_onto_a_raised_corner() {
        let mut map = Layout::parse(
            "
            ....
            ....
            ....

            ____
            ____
            ____
            ",
        )
        .unwrap()
        .build();
        // One stair step under one cell only.
        assert!(map.set_tile(p(1, 0, 0), battlescape_map::glyph_tile('2')));
        let big = Soldier::new(1, p(0, 0, 0)).with_size(2);
        assert!(price(&map, &big, p(0, 1, 0), Direction::North).is_blocked());
    }

    #[test]
    fn large_unit_climbs_only_as_a_whole() {
        // The destination cells are flat on both levels, so only the
        // disagreement about climbing can stop the step.
        let upper = "
            ...
            ...

            ...
            ...
            ";
        let one_stair = Layout::parse(&upper.replacen("...", "2..", 1)).unwrap().build();
        let big = Soldier::new(1, p(0, 0, 0)).with_size(2);
        let s = price(&one_stair, &big, p(0, 0, 0), Direction::East);
        assert_eq!(s.cost, IMPOSSIBLE);
        assert_eq!(s.destination, p(1, 0, 0));

        let two_stairs = Layout::parse(
            "
            2..
            2..

            ...
            ...
            ",
        )
        .unwrap()
        .build();
        let s = price(&two_stairs, &big, p(0, 0, 0), Direction::East);
        assert!(!s.is_blocked());
        assert_eq!(s.destination, p(1, 0, 1));
    }

    #[test]
    fn large_unit_steps_down_only_as_a_whole() {
        // Open air ahead on the upper level, the same flat level everywhere
        // up there, so only the disagreement about stepping down can block.
        let partial = Layout::parse(
            "
            ...
            ..2

            .__
            .__
            ",
        )
        .unwrap()
        .build();
        let big = Soldier::new(1, p(0, 0, 1)).with_size(2);
        let s = price(&partial, &big, p(0, 0, 1), Direction::East);
        assert_eq!(s.cost, IMPOSSIBLE);
        assert_eq!(s.destination, p(1, 0, 1));

        let full = Layout::parse(
            "
            .22
            .22

            .__
            .__
            ",
        )
        .unwrap()
        .build();
        let s = price(&full, &big, p(0, 0, 1), Direction::East);
        assert!(!s.is_blocked());
        assert_eq!(s.destination, p(1, 0, 0));
    }
}
