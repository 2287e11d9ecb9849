//! Open-set frontier: a binary heap with insertion-order tie-breaking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordered by ascending f, then ascending insertion
/// sequence. The sequence tie-break reproduces the behavior of a
/// linear first-minimum scan over an append-only open list: among
/// equal-f entries, the earliest-inserted wins.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) index: usize,
    pub(crate) f: f64,
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops smallest f first,
        // and among equal f the smallest sequence number.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The open set. Superseded entries are left in the heap and skipped
/// lazily by the search via per-node open flags.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<OpenEntry>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert `index` with priority `f`. A re-inserted index gets a
    /// fresh sequence number, as a scan-based open list would after
    /// remove-and-append.
    pub(crate) fn push(&mut self, index: usize, f: f64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(OpenEntry { index, f, seq });
    }

    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_f_first() {
        let mut fr = Frontier::new();
        fr.push(0, 3.0);
        fr.push(1, 1.0);
        fr.push(2, 2.0);
        assert_eq!(fr.pop().unwrap().index, 1);
        assert_eq!(fr.pop().unwrap().index, 2);
        assert_eq!(fr.pop().unwrap().index, 0);
        assert!(fr.pop().is_none());
    }

    #[test]
    fn equal_f_pops_in_insertion_order() {
        let mut fr = Frontier::new();
        fr.push(7, 1.5);
        fr.push(3, 1.5);
        fr.push(9, 1.5);
        assert_eq!(fr.pop().unwrap().index, 7);
        assert_eq!(fr.pop().unwrap().index, 3);
        assert_eq!(fr.pop().unwrap().index, 9);
    }

    #[test]
    fn reinsertion_moves_to_back_of_ties() {
        let mut fr = Frontier::new();
        fr.push(1, 2.0);
        fr.push(2, 2.0);
        fr.push(1, 2.0); // superseding entry, same f
        assert_eq!(fr.pop().unwrap().index, 1);
        assert_eq!(fr.pop().unwrap().index, 2);
        assert_eq!(fr.pop().unwrap().index, 1);
    }

    #[test]
    fn mixed_priorities_and_ties() {
        let mut fr = Frontier::new();
        fr.push(0, 5.0);
        fr.push(1, 4.0);
        fr.push(2, 4.0);
        fr.push(3, 6.0);
        let order: Vec<usize> = std::iter::from_fn(|| fr.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }
}
