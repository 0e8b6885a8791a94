use battlescape_core::{Battlefield, Direction, Mover, Position, Volume};
use log::trace;

use crate::cost::StepState;
use crate::pathfinder::Pathfinder;
use crate::rules::Rules;

/// A tile a unit can reach this turn and what it costs to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reachable {
    pub pos: Position,
    pub cost: i32,
}

impl Reachable {
    /// Linear tile index of the position in `volume`.
    #[inline]
    pub fn index(&self, volume: Volume) -> Option<usize> {
        volume.index(self.pos)
    }
}

impl Pathfinder {
    /// Every tile `unit` can reach for at most `max_tu` time units without
    /// running out of energy, cheapest first. The unit's own tile comes
    /// first at cost 0.
    ///
    /// Uses the modifier snapshot of the last [`calculate`] or
    /// [`abort_path`] call. Strafing is never considered.
    ///
    /// [`calculate`]: Pathfinder::calculate
    /// [`abort_path`]: Pathfinder::abort_path
    pub fn find_reachable<F, U>(&mut self, field: &F, unit: &U, max_tu: i32) -> Vec<Reachable>
    where
        F: Battlefield + ?Sized,
        U: Mover + ?Sized,
    {
        self.fit(field);
        self.movement = Self::effective_movement(unit, self.input);
        self.step = StepState::default();
        let rules = Rules {
            field,
            unit,
            movement: self.movement,
            missile_target: None,
            input: self.input,
        };

        for node in &mut self.nodes {
            node.reset();
        }
        self.open.clear();

        let origin = unit.position();
        let Some(start_idx) = self.volume.index(origin) else {
            return Vec::new();
        };
        self.nodes[start_idx].connect(0, None);
        self.open.push(&mut self.nodes, start_idx);

        let energy = unit.energy();
        let mut out = Vec::new();
        while let Some(ci) = self.open.pop(&mut self.nodes) {
            self.nodes[ci].set_checked();
            let current = self.nodes[ci].pos();
            let current_cost = self.nodes[ci].tu_cost(false);
            out.push(Reachable {
                pos: current,
                cost: current_cost,
            });

            for dir in Direction::ALL {
                let step = rules.step_cost(current, dir, &mut self.step, false);
                if step.is_blocked() {
                    continue;
                }
                let total = current_cost + step.cost;
                if total > max_tu || total / 2 > energy {
                    continue;
                }
                let Some(ni) = self.volume.index(step.destination) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_checked() {
                    continue;
                }
                if !n.in_open_set() || n.tu_cost(false) > total {
                    n.connect(total, Some((ci, step.direction)));
                    self.open.push(&mut self.nodes, ni);
                }
            }
        }

        out.sort_by_key(|r| r.cost);
        trace!(
            "{}: {} tiles reachable for {max_tu} TU",
            unit.id(),
            out.len()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathOptions;
    use battlescape_map::{FLOOR_COST, Layout, Soldier};

    fn p(x: i32, y: i32, z: i32) -> Position {
        Position::new(x, y, z)
    }

    #[test]
    fn origin_first_and_sorted() {
        let map = Layout::parse(
            "
            .....
            .....
            .....
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(2, 1, 0));
        let mut pf = Pathfinder::new(map.volume(), PathOptions::default());
        let r = pf.find_reachable(&map, &unit, 8);
        assert_eq!(r[0], Reachable { pos: p(2, 1, 0), cost: 0 });
        assert!(r.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert!(r.iter().all(|e| e.cost <= 8));
        // Two cardinal steps east reach the edge.
        assert!(r.contains(&Reachable { pos: p(4, 1, 0), cost: 2 * FLOOR_COST }));
        // A diagonal plus a cardinal step costs 10: out of reach.
        assert!(!r.iter().any(|e| e.pos == p(4, 0, 0)));
    }

    #[test]
    fn energy_limits_range() {
        let map = Layout::parse("..........").unwrap().build();
        let unit = Soldier::new(1, p(0, 0, 0)).with_budget(60, 4);
        let mut pf = Pathfinder::new(map.volume(), PathOptions::default());
        let r = pf.find_reachable(&map, &unit, 100);
        // Each step drains half its cost: 4 energy buys two steps.
        let far = r.iter().map(|e| e.pos.x).max();
        assert_eq!(far, Some(2));
    }

    #[test]
    fn impassable_tiles_never_appear() {
        let map = Layout::parse(
            "
            .x.
            .x.
            ",
        )
        .unwrap()
        .build();
        let unit = Soldier::new(1, p(0, 0, 0));
        let mut pf = Pathfinder::new(map.volume(), PathOptions::default());
        let r = pf.find_reachable(&map, &unit, 100);
        assert!(r.iter().all(|e| e.pos.x == 0));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn index_matches_volume() {
        let map = Layout::parse("...\n...").unwrap().build();
        let unit = Soldier::new(1, p(1, 1, 0));
        let mut pf = Pathfinder::new(map.volume(), PathOptions::default());
        for e in pf.find_reachable(&map, &unit, 100) {
            let i = e.index(map.volume()).unwrap();
            assert_eq!(map.volume().position(i), e.pos);
        }
    }
}
