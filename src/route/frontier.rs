//! Search arena and priority queue entries for A*.

use std::cmp::Ordering;

/// A graph node reached during one search, with the cost of the path that
/// reached it. `previous` is the arena index of the node it was reached from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SearchNode {
    pub slot: usize,
    pub cost: f64,
    pub heuristic: f64,
    pub previous: Option<usize>,
}

impl SearchNode {
    pub fn start(slot: usize, heuristic: f64) -> Self {
        Self {
            slot,
            cost: 0.0,
            heuristic,
            previous: None,
        }
    }

    /// Accumulated cost plus the straight-line estimate to the goal.
    pub fn priority(&self) -> f64 {
        self.cost + self.heuristic
    }
}

/// Queue entry pointing into the arena.
///
/// Ordered so that `BinaryHeap` pops the lowest priority first; among equal
/// priorities the node created first wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct QueueEntry {
    pub priority: f64,
    pub index: usize,
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.index.cmp(&self.index))
    }
}
