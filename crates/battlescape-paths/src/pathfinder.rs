use battlescape_core::{
    Battlefield, Direction, Faction, Footprint, InputState, MovementType, Mover, Position,
    STAIRS_TOP, TilePart, UnitId, Volume,
};
use log::debug;

use crate::cost::{StepCost, StepState};
use crate::distance::chebyshev;
use crate::node::PathNode;
use crate::open_set::OpenSet;
use crate::options::PathOptions;
use crate::rules::{self, Rules, VerticalMove, has_swing_door};

/// Default ceiling on the TU cost of a path.
pub const DEFAULT_MAX_COST: i32 = 1000;
/// Pass as `max_cost` together with a missile target to plan a guided
/// projectile's route: blocking rules apply, costs do not.
pub const MISSILE_COST_SENTINEL: i32 = -1;
/// Effective ceiling of a missile search.
pub const MISSILE_MAX_COST: i32 = 10000;

/// Which search produced the current path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Strategy {
    Line,
    Graph,
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Movement planner for one battle.
///
/// A `Pathfinder` owns one [`PathNode`] per tile of the battlefield and
/// reuses them for every search, so repeated queries do not allocate after
/// the first. It also holds the result of the last [`calculate`] call: the
/// path, its cost and the strafe/dash flags the execution layer needs.
///
/// Searches must be serialized; the node table is shared by all of them.
///
/// [`calculate`]: Pathfinder::calculate
pub struct Pathfinder {
    pub(crate) volume: Volume,
    pub(crate) nodes: Vec<PathNode>,
    pub(crate) open: OpenSet,
    /// Directions, last step first.
    pub(crate) path: Vec<Direction>,
    pub(crate) total_cost: i32,
    pub(crate) movement: MovementType,
    pub(crate) step: StepState,
    pub(crate) dash: bool,
    pub(crate) input: InputState,
    options: PathOptions,
    pub(crate) previewed: Vec<Position>,
    pub(crate) preview_on: bool,
}

impl Pathfinder {
    /// Create a planner for a battlefield of the given size.
    pub fn new(volume: Volume, options: PathOptions) -> Self {
        Self {
            volume,
            nodes: volume.iter().map(PathNode::new).collect(),
            open: OpenSet::new(),
            path: Vec::new(),
            total_cost: 0,
            movement: MovementType::Walk,
            step: StepState::default(),
            dash: false,
            input: InputState::NONE,
            options,
            previewed: Vec::new(),
            preview_on: false,
        }
    }

    /// Resize the node table for another battlefield. The stored path is
    /// dropped; preview bookkeeping is kept so markers can still be removed.
    pub fn set_volume(&mut self, volume: Volume) {
        if volume == self.volume {
            return;
        }
        self.volume = volume;
        self.nodes.clear();
        self.nodes.extend(volume.iter().map(PathNode::new));
        self.open.clear();
        self.path.clear();
        self.total_cost = 0;
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn options(&self) -> PathOptions {
        self.options
    }

    pub fn set_options(&mut self, options: PathOptions) {
        self.options = options;
    }

    /// Search state of the node at `pos` after the last search.
    pub fn node(&self, pos: Position) -> Option<&PathNode> {
        self.volume.index(pos).and_then(|i| self.nodes.get(i))
    }

    pub(crate) fn fit<F: Battlefield + ?Sized>(&mut self, field: &F) {
        self.set_volume(field.volume());
    }

    /// The movement type the unit actually uses under `input`: force-walk
    /// grounds flyers, except those that never land.
    pub(crate) fn effective_movement<U: Mover + ?Sized>(unit: &U, input: InputState) -> MovementType {
        let mt = unit.movement_type();
        if mt == MovementType::Fly && input.force_walk && !unit.always_flies() && !unit.is_vehicle() {
            MovementType::Walk
        } else {
            mt
        }
    }

    fn rules_for<'a, F, U>(
        &self,
        field: &'a F,
        unit: &'a U,
        missile_target: Option<UnitId>,
    ) -> Rules<'a, F, U>
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        Rules {
            field,
            unit,
            movement: Self::effective_movement(unit, self.input),
            missile_target,
            input: self.input,
        }
    }

    // -----------------------------------------------------------------------
    // Path calculation
    // -----------------------------------------------------------------------

    /// Plan a route for `unit` to `dest`.
    ///
    /// Returns whether a non-empty path was found. On failure the stored
    /// path is empty and its cost 0. `dest` may be corrected vertically
    /// first: a stair top moves it up a level, and a walking unit's
    /// destination drops while there is nothing to stand on.
    ///
    /// With a `missile_target` and `max_cost` equal to
    /// [`MISSILE_COST_SENTINEL`] the route is planned for a guided
    /// projectile: it flies and every step costs 0.
    pub fn calculate<F, U>(
        &mut self,
        field: &F,
        unit: &U,
        dest: Position,
        missile_target: Option<UnitId>,
        max_cost: i32,
        input: InputState,
    ) -> bool
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        self.fit(field);
        self.input = input;
        self.path.clear();
        self.total_cost = 0;
        self.step = StepState::default();
        self.dash = false;

        let size = unit.size();
        if !self.volume.contains_footprint(dest, size) {
            debug!("{}: destination {dest} is off the map", unit.id());
            return false;
        }

        self.movement = Self::effective_movement(unit, input);
        let mut max_cost = max_cost;
        if missile_target.is_some() && max_cost == MISSILE_COST_SENTINEL {
            self.movement = MovementType::Fly;
            max_cost = MISSILE_MAX_COST;
        }
        let missile = missile_target.is_some() && max_cost == MISSILE_MAX_COST;
        let sneak = self.options.sneaky_ai && unit.faction() == Faction::Hostile;

        let rules = Rules {
            field,
            unit,
            movement: self.movement,
            missile_target,
            input,
        };

        if destination_blocked(&rules, dest) {
            debug!("{}: destination {dest} is blocked", unit.id());
            return false;
        }

        let mut dest = dest;
        while dest.z + 1 < self.volume.height()
            && field
                .tile(dest)
                .is_some_and(|t| t.terrain_level() == STAIRS_TOP)
        {
            dest = dest.above();
        }
        if !self.movement.is_flying() {
            while rules::can_fall_down(field, dest, size) {
                dest = dest.below();
            }
        }
        if destination_blocked(&rules, dest) {
            debug!("{}: corrected destination {dest} is blocked", unit.id());
            return false;
        }
        if size > 1 && !footprint_fits(&rules, dest, size) {
            debug!("{}: footprint does not fit at {dest}", unit.id());
            return false;
        }

        let start = unit.position();
        let near = chebyshev(start, dest) < 2 && dest.z == start.z;
        let strafe_keys = if unit.is_vehicle() {
            input.strafe && input.force_walk
        } else {
            input.strafe
        };
        let strafe = self.options.strafe && near && strafe_keys;

        let mut strategy = self.search(&rules, start, dest, sneak, max_cost, missile, strafe);
        if strategy.is_some() && self.step.strafe_move && self.path.len() > 2 {
            debug!("{}: strafe rejected, retrying as a plain move", unit.id());
            strategy = self.search(&rules, start, dest, sneak, max_cost, missile, false);
        }
        if strategy.is_none() {
            self.path.clear();
            self.total_cost = 0;
        }

        self.dash = !self.step.strafe_move
            && self.options.strafe
            && input.strafe
            && !unit.is_vehicle()
            && size == 1
            && self.path.len() > 1;

        debug!(
            "{}: path to {dest}: {} steps, {} TU via {:?} (strafe: {}, dash: {})",
            unit.id(),
            self.path.len(),
            self.total_cost,
            strategy,
            self.step.strafe_move,
            self.dash,
        );
        !self.path.is_empty()
    }

    /// One attempt: the straight line when it stays on one level, then the
    /// graph search.
    #[allow(clippy::too_many_arguments)]
    fn search<F, U>(
        &mut self,
        rules: &Rules<'_, F, U>,
        start: Position,
        dest: Position,
        sneak: bool,
        max_cost: i32,
        missile: bool,
        strafe: bool,
    ) -> Option<Strategy>
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        self.step = StepState {
            strafe_move: strafe,
            open_door: 0,
        };
        self.path.clear();
        self.total_cost = 0;

        if start.z == dest.z && self.bresenham_path(rules, start, dest, sneak, max_cost, missile) {
            return Some(Strategy::Line);
        }
        self.path.clear();
        self.total_cost = 0;
        if self.astar_path(rules, start, dest, sneak, max_cost, missile) {
            return Some(Strategy::Graph);
        }
        None
    }

    // -----------------------------------------------------------------------
    // Rule queries
    // -----------------------------------------------------------------------

    /// Price one step of `unit` from `start`. See [`StepCost`] for the
    /// corrected destination and direction. Updates the open-door cost and,
    /// for vehicles, may clear the strafe flag.
    pub fn tu_cost<F, U>(
        &mut self,
        field: &F,
        unit: &U,
        start: Position,
        dir: Direction,
        missile_target: Option<UnitId>,
        missile: bool,
    ) -> StepCost
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        let rules = self.rules_for(field, unit, missile_target);
        rules.step_cost(start, dir, &mut self.step, missile)
    }

    /// Whether `unit` can go straight up or down from `start`, and how.
    pub fn validate_up_down<F, U>(
        &self,
        field: &F,
        unit: &U,
        start: Position,
        dir: Direction,
    ) -> VerticalMove
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        self.rules_for(field, unit, None).validate_up_down(start, dir)
    }

    /// Whether a `size × size` footprint at `pos` has nothing to stand on.
    pub fn can_fall_down<F: Battlefield + ?Sized>(field: &F, pos: Position, size: i32) -> bool {
        rules::can_fall_down(field, pos, size)
    }

    /// Whether walls, doors or bigwalls stop `unit` stepping from `pos` in
    /// `dir`.
    pub fn is_blocked<F, U>(
        &self,
        field: &F,
        unit: &U,
        pos: Position,
        dir: Direction,
        missile_target: Option<UnitId>,
    ) -> bool
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        self.rules_for(field, unit, missile_target)
            .step_blocked(pos, dir)
    }

    // -----------------------------------------------------------------------
    // Path queries
    // -----------------------------------------------------------------------

    /// The first step of the path, without consuming it.
    #[inline]
    pub fn start_direction(&self) -> Option<Direction> {
        self.path.last().copied()
    }

    /// Consume and return the next step.
    #[inline]
    pub fn dequeue_path(&mut self) -> Option<Direction> {
        self.path.pop()
    }

    /// The remaining steps in walking order.
    pub fn path(&self) -> Vec<Direction> {
        self.path.iter().rev().copied().collect()
    }

    #[inline]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// TU cost of the whole path as computed.
    #[inline]
    pub fn total_tu_cost(&self) -> i32 {
        self.total_cost
    }

    /// Drop the path and take a fresh modifier snapshot.
    pub fn abort_path(&mut self, input: InputState) {
        self.input = input;
        self.path.clear();
        self.total_cost = 0;
        self.step.strafe_move = false;
        self.dash = false;
    }

    #[inline]
    pub fn strafe_move(&self) -> bool {
        self.step.strafe_move
    }

    #[inline]
    pub fn is_dash(&self) -> bool {
        self.dash
    }

    /// Movement type used by the last search.
    #[inline]
    pub fn movement_type(&self) -> MovementType {
        self.movement
    }

    /// Cost of the most expensive door crossed by the last priced step.
    #[inline]
    pub fn open_door_cost(&self) -> i32 {
        self.step.open_door
    }

    #[inline]
    pub fn is_previewed(&self) -> bool {
        self.preview_on
    }
}

fn destination_blocked<F, U>(rules: &Rules<'_, F, U>, dest: Position) -> bool
where
    F: Battlefield + ?Sized,
    U: Mover + ?Sized,
{
    rules.part_blocked(dest, TilePart::Floor) || rules.part_blocked(dest, TilePart::Object)
}

/// Whether every extra cell of a large footprint at `dest` is reachable
/// from its anchor and free of visible units.
fn footprint_fits<F, U>(rules: &Rules<'_, F, U>, dest: Position, size: i32) -> bool
where
    F: Battlefield + ?Sized,
    U: Mover + ?Sized,
{
    for off in Footprint::new(size).extra_offsets() {
        let Some(dir) = Direction::from_vector(Position::new(off.x.signum(), off.y.signum(), 0))
        else {
            return false;
        };
        let Some(tile) = rules.field.tile(dest + off) else {
            return false;
        };
        if dir.is_diagonal()
            && (has_swing_door(tile, TilePart::NorthWall) || has_swing_door(tile, TilePart::WestWall))
        {
            return false;
        }
        if rules.step_blocked(dest, dir) {
            return false;
        }
        let stranger = tile.occupant.is_some_and(|occ| {
            occ.visible && occ.id != rules.unit.id() && Some(occ.id) != rules.missile_target
        });
        if stranger {
            return false;
        }
    }
    true
}
