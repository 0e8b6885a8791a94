//! Priority frontier with lazy invalidation.
//!
//! Re-pushing a queued node does not remove its old heap entry. Instead the
//! node's handle is moved to the new entry, and entries whose handle no
//! longer matches are discarded when they surface at the top of the heap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::node::PathNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    handle: u32,
    node: usize,
    priority: i32,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first,
        // oldest entry first among equals.
        other
            .priority
            .cmp(&self.priority)
            .then(other.handle.cmp(&self.handle))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of node-table indices.
#[derive(Clone, Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<Entry>,
    next_handle: u32,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_handle = 0;
    }

    /// Queue `idx` at its current priority. If it was already queued the
    /// old entry goes stale. The new priority must not be worse than the
    /// live one.
    pub fn push(&mut self, nodes: &mut [PathNode], idx: usize) {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        let node = &mut nodes[idx];
        node.open_entry = Some(handle);
        self.heap.push(Entry {
            handle,
            node: idx,
            priority: node.priority(),
        });
    }

    /// Remove and return the live node with the lowest priority.
    pub fn pop(&mut self, nodes: &mut [PathNode]) -> Option<usize> {
        self.discard_stale(nodes);
        let entry = self.heap.pop()?;
        nodes[entry.node].open_entry = None;
        self.discard_stale(nodes);
        Some(entry.node)
    }

    /// Whether no live entry is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn discard_stale(&mut self, nodes: &[PathNode]) {
        while let Some(top) = self.heap.peek() {
            if nodes[top.node].open_entry == Some(top.handle) {
                break;
            }
            self.heap.pop();
        }
    }
}
