use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::search::SearchState;

struct Entry {
    bound: f64,
    seq: u64,
    state: SearchState,
}

// Ordered by key only, reversed so the max-heap pops the lowest (bound, seq).
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .bound
            .total_cmp(&self.bound)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Best-first queue of search states, lowest bound first. Equal bounds pop in
/// insertion order.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bound: f64, state: SearchState) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { bound, seq, state });
    }

    pub fn pop(&mut self) -> Option<(f64, SearchState)> {
        self.heap.pop().map(|e| (e.bound, e.state))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of states ever pushed.
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }
}
