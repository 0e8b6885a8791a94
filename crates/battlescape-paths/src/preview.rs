//! Path preview markers.
//!
//! Previewing writes a [`PathMarker`] on every tile the unit will cover
//! along the stored path: the arrow out of the tile, the time units left on
//! arrival, and a colour saying whether the move is affordable and keeps
//! the turn's reserved time intact.

use battlescape_core::{MarkerArrow, MarkerColor, Mover, PathMarker, Position, PreviewSurface};

use crate::cost::StepState;
use crate::pathfinder::Pathfinder;
use crate::rules::Rules;

/// TU cost of standing up from a kneel before the first step.
pub const KNEEL_STAND_COST: i32 = 8;

/// Decides whether spending time units leaves the reserved amount intact.
pub trait ReservationPolicy {
    /// Whether a unit with `time_units` at the start of the move may spend
    /// `tu_spent` of them.
    fn allows(&self, time_units: i32, tu_spent: i32) -> bool;
}

/// Nothing is reserved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoReservation;

impl ReservationPolicy for NoReservation {
    fn allows(&self, _time_units: i32, _tu_spent: i32) -> bool {
        true
    }
}

/// Keep this many time units for an action after moving.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReservedTime(pub i32);

impl ReservationPolicy for ReservedTime {
    fn allows(&self, time_units: i32, tu_spent: i32) -> bool {
        time_units - tu_spent >= self.0
    }
}

impl Pathfinder {
    /// Mark the stored path on `surface`.
    ///
    /// Returns `false` without touching anything if there is no path or a
    /// preview is already shown.
    pub fn preview_path<S, U, R>(&mut self, surface: &mut S, unit: &U, reservation: &R) -> bool
    where
        S: PreviewSurface + ?Sized,
        U: Mover + ?Sized,
        R: ReservationPolicy + ?Sized,
    {
        if self.preview_on || self.path.is_empty() {
            return false;
        }
        let marks = self.plan_markers(&*surface, unit, reservation);
        for (pos, marker) in marks {
            if let Some(t) = surface.tile_mut(pos) {
                t.marker = Some(marker);
                self.previewed.push(pos);
            }
        }
        self.preview_on = true;
        true
    }

    /// Clear every marker the last preview wrote. Returns `false` if no
    /// preview was shown.
    pub fn remove_preview<S: PreviewSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.preview_on {
            return false;
        }
        for pos in self.previewed.drain(..) {
            if let Some(t) = surface.tile_mut(pos) {
                t.marker = None;
            }
        }
        self.preview_on = false;
        true
    }

    /// Replay the path step by step and work out each tile's marker.
    fn plan_markers<S, U, R>(
        &self,
        surface: &S,
        unit: &U,
        reservation: &R,
    ) -> Vec<(Position, PathMarker)>
    where
        S: PreviewSurface + ?Sized,
        U: Mover + ?Sized,
        R: ReservationPolicy + ?Sized,
    {
        let rules = Rules {
            field: surface,
            unit,
            movement: self.movement,
            missile_target: None,
            input: self.input,
        };
        let mut state = StepState {
            strafe_move: self.step.strafe_move,
            open_door: 0,
        };

        let fp = unit.footprint();
        let far = fp.far_corner();
        let mut pos = unit.position();
        let mut tus = unit.time_units();
        let mut energy = unit.energy();
        let mut spent = 0;
        if unit.is_kneeling() {
            tus -= KNEEL_STAND_COST;
            spent += KNEEL_STAND_COST;
        }

        let steps = self.path();
        let mut marks = Vec::with_capacity(steps.len() * fp.cells() as usize);
        for (i, &dir) in steps.iter().enumerate() {
            let step = rules.step_cost(pos, dir, &mut state, false);
            let (tu, drain) = if self.dash {
                (step.cost * 3 / 4, step.cost * 3 / 2)
            } else if step.direction.is_vertical() {
                (step.cost, 0)
            } else {
                (step.cost, step.cost / 2)
            };
            tus -= tu;
            energy -= drain;
            spent += tu;

            let color = if tus < 0 || energy < 0 {
                MarkerColor::Red
            } else if !reservation.allows(unit.time_units(), spent) {
                MarkerColor::Yellow
            } else {
                MarkerColor::Green
            };
            let arrow = match steps.get(i + 1) {
                Some(&next) => MarkerArrow::Step(next),
                None => MarkerArrow::Destination,
            };

            pos = step.destination;
            for off in fp.offsets() {
                marks.push((
                    pos + off,
                    PathMarker {
                        arrow,
                        tu_left: (off == far).then_some(tus.max(0)),
                        color,
                    },
                ));
            }
        }
        marks
    }
}
