use battlescape_core::{Direction, Position};

use crate::distance::heuristic;

/// Per-tile search state.
///
/// The [`Pathfinder`](crate::Pathfinder) keeps one node per tile for its whole
/// lifetime and resets them at the start of every search instead of
/// reallocating. Predecessors are node-table indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
    pos: Position,
    checked: bool,
    tu_cost: i32,
    tu_guess: i32,
    prev: Option<(usize, Direction)>,
    /// Handle of this node's live entry in the open set, if any.
    pub(crate) open_entry: Option<u32>,
}

impl PathNode {
    pub(crate) fn new(pos: Position) -> Self {
        Self {
            pos,
            checked: false,
            tu_cost: 0,
            tu_guess: 0,
            prev: None,
            open_entry: None,
        }
    }

    /// Forget the previous search: not checked, not queued.
    #[inline]
    pub fn reset(&mut self) {
        self.checked = false;
        self.open_entry = None;
    }

    /// Record a (better) way to reach this node and estimate the remaining
    /// distance to `target`. The estimate is only computed when the node is
    /// not already queued, since it does not depend on the path taken.
    pub fn link(&mut self, cost: i32, prev: Option<(usize, Direction)>, target: Position) {
        self.tu_cost = cost;
        self.prev = prev;
        if !self.in_open_set() {
            self.tu_guess = heuristic(self.pos, target);
        }
    }

    /// Like [`link`](Self::link) without a target: plain cost-ordered
    /// flooding.
    pub fn connect(&mut self, cost: i32, prev: Option<(usize, Direction)>) {
        self.tu_cost = cost;
        self.prev = prev;
        self.tu_guess = 0;
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    #[inline]
    pub fn set_checked(&mut self) {
        self.checked = true;
    }

    /// Cost so far. Missile searches ignore cost and always see 0.
    #[inline]
    pub fn tu_cost(&self, missile: bool) -> i32 {
        if missile { 0 } else { self.tu_cost }
    }

    #[inline]
    pub fn tu_guess(&self) -> i32 {
        self.tu_guess
    }

    /// Queue priority: cost so far plus the estimate.
    #[inline]
    pub fn priority(&self) -> i32 {
        self.tu_cost + self.tu_guess
    }

    /// Predecessor index and the direction of the step taken from it.
    #[inline]
    pub fn prev(&self) -> Option<(usize, Direction)> {
        self.prev
    }

    #[inline]
    pub fn in_open_set(&self) -> bool {
        self.open_entry.is_some()
    }
}
