//! Movement planning for turn-based tactical battles.
//!
//! A [`Pathfinder`] plans routes for one unit at a time across a multi-level
//! battlefield of tiles, honouring walls, doors, diagonal bigwalls, stairs,
//! gravlifts, flight, occupants and multi-tile footprints:
//!
//! - **Route planning** ([`Pathfinder::calculate`]): a straight line first,
//!   A\* when the line is blocked or changes level.
//! - **Step pricing** ([`Pathfinder::tu_cost`]): the time-unit cost of one
//!   step, with destination correction for stairs and falls.
//! - **Reachability** ([`Pathfinder::find_reachable`]): every tile affordable
//!   this turn, cheapest first.
//! - **Preview** ([`Pathfinder::preview_path`],
//!   [`Pathfinder::remove_preview`]): path markers on the battlefield tiles.
//!
//! The battlefield and the acting unit are reached through the
//! [`Battlefield`](battlescape_core::Battlefield),
//! [`PreviewSurface`](battlescape_core::PreviewSurface) and
//! [`Mover`](battlescape_core::Mover) traits. Failure is never an error:
//! an unreachable destination leaves an empty path, and an impossible step
//! costs [`IMPOSSIBLE`](battlescape_core::IMPOSSIBLE).
//!
//! # Logging
//!
//! Decisions are reported through the [`log`] facade: `debug` for rejected
//! destinations, strafe retries and path summaries, `trace` for search
//! sizes. No logger is installed by this crate.

mod astar;
mod bresenham;
mod cost;
mod distance;
mod node;
mod open_set;
mod options;
mod pathfinder;
mod preview;
mod reachable;
mod rules;

#[cfg(test)]
mod proptests;

pub use cost::{
    FIRE_AVOIDANCE_COST, FIRE_SURCHARGE, MAX_STEP_HEIGHT, NO_FLOOR_COST, STAIRS_CLIMB_COST,
    StepCost, VERTICAL_MOVE_COST,
};
pub use distance::{chebyshev, heuristic};
pub use node::PathNode;
pub use open_set::OpenSet;
pub use options::PathOptions;
pub use pathfinder::{DEFAULT_MAX_COST, MISSILE_COST_SENTINEL, MISSILE_MAX_COST, Pathfinder};
pub use preview::{KNEEL_STAND_COST, NoReservation, ReservationPolicy, ReservedTime};
pub use reachable::Reachable;
pub use rules::VerticalMove;
