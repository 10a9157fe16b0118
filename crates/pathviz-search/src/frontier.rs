//! Min-queue of candidate cells.
//!
//! Entries are ordered by `(estimated_total, seq)` where `seq` is a
//! monotonically increasing insertion counter, so equal estimates pop
//! first-in, first-out. Coordinates never take part in the ordering.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use pathviz_core::Coord;

/// A pending candidate. The same coordinate may be queued several times;
/// stale copies are skipped by the engine once the cell is closed.
#[derive(Debug, Clone, Copy)]
pub struct FrontierEntry {
    pub estimated_total: i32,
    pub seq: u64,
    pub coord: Coord,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_total == other.estimated_total && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimated_total
            .cmp(&other.estimated_total)
            .then(self.seq.cmp(&other.seq))
    }
}

/// The open list of a search session.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `coord` with the given estimate and a fresh sequence number.
    pub fn push(&mut self, estimated_total: i32, coord: Coord) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(FrontierEntry {
            estimated_total,
            seq,
            coord,
        }));
    }

    /// Remove and return the minimum entry.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    /// The minimum entry without removing it.
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.peek().map(|Reverse(e)| e)
    }

    /// Number of queued entries, stale duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
