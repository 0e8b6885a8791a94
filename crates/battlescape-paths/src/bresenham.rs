use battlescape_core::{Battlefield, Direction, Mover, Position};

use crate::pathfinder::Pathfinder;
use crate::rules::Rules;

/// Tiles of the digital line from `a` (excluded) to `b` (included).
///
/// The longest axis drives the walk; the two minor axes advance when their
/// accumulated drift crosses zero.
fn line(a: Position, b: Position) -> Vec<Position> {
    let (mut x0, mut y0, mut z0) = (a.x, a.y, a.z);
    let (mut x1, mut y1, mut z1) = (b.x, b.y, b.z);

    let swap_xy = (y1 - y0).abs() > (x1 - x0).abs();
    if swap_xy {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    let swap_xz = (z1 - z0).abs() > (x1 - x0).abs();
    if swap_xz {
        std::mem::swap(&mut x0, &mut z0);
        std::mem::swap(&mut x1, &mut z1);
    }

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let dz = (z1 - z0).abs();
    let step_x = if x0 > x1 { -1 } else { 1 };
    let step_y = if y0 > y1 { -1 } else { 1 };
    let step_z = if z0 > z1 { -1 } else { 1 };

    let mut drift_xy = dx / 2;
    let mut drift_xz = dx / 2;
    let (mut x, mut y, mut z) = (x0, y0, z0);
    let mut out = Vec::with_capacity(dx as usize);
    while x != x1 {
        x += step_x;
        drift_xy -= dy;
        drift_xz -= dz;
        if drift_xy < 0 {
            y += step_y;
            drift_xy += dx;
        }
        if drift_xz < 0 {
            z += step_z;
            drift_xz += dx;
        }

        let (mut cx, mut cy, mut cz) = (x, y, z);
        if swap_xz {
            std::mem::swap(&mut cx, &mut cz);
        }
        if swap_xy {
            std::mem::swap(&mut cx, &mut cy);
        }
        out.push(Position::new(cx, cy, cz));
    }
    out
}

/// Steps along a straight line must cost the same, allowing a diagonal to
/// cost half again as much as a cardinal step and the other way round.
/// Half again is truncated the way diagonal steps are priced.
fn consistent(last: Option<i32>, cost: i32, diagonal: bool) -> bool {
    match last {
        None => true,
        Some(l) => {
            cost == l || (diagonal && cost == l + l / 2) || (!diagonal && l == cost + cost / 2)
        }
    }
}

impl Pathfinder {
    /// Try the straight line from `origin` to `target` on one level.
    ///
    /// All or nothing: any blocked, corrected or inconsistently priced step
    /// rejects the whole line. On success the path is stored last step
    /// first.
    pub(crate) fn bresenham_path<F, U>(
        &mut self,
        rules: &Rules<'_, F, U>,
        origin: Position,
        target: Position,
        sneak: bool,
        max_cost: i32,
        missile: bool,
    ) -> bool
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        if origin.z != target.z {
            return false;
        }

        let mut last = origin;
        let mut last_cost = None;
        let mut total = 0;
        for next in line(origin, target) {
            let Some(dir) = Direction::from_vector(next - last) else {
                return false;
            };
            let step = rules.step_cost(last, dir, &mut self.step, missile);
            if sneak
                && rules
                    .field
                    .tile(step.destination)
                    .is_some_and(|t| t.visible)
            {
                return false;
            }
            if step.destination != next
                || step.is_blocked()
                || !consistent(last_cost, step.cost, dir.is_diagonal())
                || rules.step_blocked(last, dir)
            {
                return false;
            }

            self.path.push(dir);
            if !missile {
                last_cost = Some(step.cost);
                total += step.cost;
                if total > max_cost {
                    return false;
                }
            }
            last = next;
        }

        self.path.reverse();
        self.total_cost = total;
        true
    }
}
