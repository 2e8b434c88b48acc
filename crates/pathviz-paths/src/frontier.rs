//! Frontier containers for the search steppers.
//!
//! The priority variant is a min-heap keyed by `(priority, insertion_order)`:
//! lower priorities are popped first and ties are broken FIFO, which keeps
//! the expansion order deterministic.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use pathviz_core::Coord;

/// A frontier entry: a node and the path cost it was admitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) coord: Coord,
    pub(crate) cost: i32,
}

/// Heap entry for the priority frontier.
#[derive(Debug)]
struct Ranked {
    entry: Entry,
    priority: i32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    // Natural order; the heap stores `Reverse<Ranked>` to pop the smallest.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Discovered-but-unprocessed nodes, ordered by search strategy.
#[derive(Debug)]
pub(crate) enum Frontier {
    /// FIFO queue (breadth-first).
    Queue(VecDeque<Entry>),
    /// LIFO stack (depth-first).
    Stack(Vec<Entry>),
    /// Min-priority queue with FIFO tie-breaking (best-first, A*).
    Priority {
        heap: BinaryHeap<Reverse<Ranked>>,
        seq: u64,
    },
}

impl Frontier {
    pub(crate) fn queue() -> Self {
        Self::Queue(VecDeque::new())
    }

    pub(crate) fn stack() -> Self {
        Self::Stack(Vec::new())
    }

    pub(crate) fn priority() -> Self {
        Self::Priority {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push a node. `priority` is ignored by the queue and stack variants.
    pub(crate) fn push(&mut self, entry: Entry, priority: i32) {
        match self {
            Self::Queue(q) => q.push_back(entry),
            Self::Stack(s) => s.push(entry),
            Self::Priority { heap, seq } => {
                let s = *seq;
                *seq += 1;
                heap.push(Reverse(Ranked {
                    entry,
                    priority,
                    seq: s,
                }));
            }
        }
    }

    /// Remove the next node according to the variant's ordering.
    pub(crate) fn pop(&mut self) -> Option<Entry> {
        match self {
            Self::Queue(q) => q.pop_front(),
            Self::Stack(s) => s.pop(),
            Self::Priority { heap, .. } => heap.pop().map(|Reverse(r)| r.entry),
        }
    }
}
