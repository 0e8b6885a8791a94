use battlescape_core::{Battlefield, Direction, Mover, Position};
use log::trace;

use crate::pathfinder::Pathfinder;
use crate::rules::Rules;

impl Pathfinder {
    /// Best-first search from `origin` to `target` over all ten step
    /// directions.
    ///
    /// Missile searches see every node at cost 0 and so only honour
    /// blocking. Sneaking units pay double for tiles the enemy can see.
    /// On success the path is stored last step first.
    pub(crate) fn astar_path<F, U>(
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
        for node in &mut self.nodes {
            node.reset();
        }
        self.open.clear();

        let (Some(start_idx), Some(goal_idx)) =
            (self.volume.index(origin), self.volume.index(target))
        else {
            return false;
        };

        self.nodes[start_idx].link(0, None, target);
        self.open.push(&mut self.nodes, start_idx);

        let mut expanded = 0usize;
        let found = 'search: loop {
            let Some(ci) = self.open.pop(&mut self.nodes) else {
                break 'search false;
            };
            self.nodes[ci].set_checked();
            expanded += 1;

            if ci == goal_idx {
                break 'search true;
            }

            let current = self.nodes[ci].pos();
            let current_cost = self.nodes[ci].tu_cost(missile);

            for dir in Direction::ALL {
                let step = rules.step_cost(current, dir, &mut self.step, missile);
                if step.is_blocked() {
                    continue;
                }
                let mut cost = step.cost;
                if sneak
                    && rules
                        .field
                        .tile(step.destination)
                        .is_some_and(|t| t.visible)
                {
                    cost *= 2;
                }

                let Some(ni) = self.volume.index(step.destination) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_checked() {
                    continue;
                }
                let tentative = current_cost + cost;
                if (!n.in_open_set() || n.tu_cost(missile) > tentative) && tentative <= max_cost {
                    n.link(tentative, Some((ci, step.direction)), target);
                    self.open.push(&mut self.nodes, ni);
                }
            }
        };

        trace!("A* from {origin} to {target}: {expanded} nodes expanded, found: {found}");
        if !found {
            return false;
        }

        // Reconstruct path; walking back from the goal yields the last step
        // first.
        let mut ci = goal_idx;
        while let Some((prev, dir)) = self.nodes[ci].prev() {
            self.path.push(dir);
            ci = prev;
        }
        self.total_cost = self.nodes[goal_idx].tu_cost(missile);
        true
    }
}
