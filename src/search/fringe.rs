use super::NodeIndex;

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, TryReserveError, VecDeque},
};

/// The set of generated nodes waiting to be expanded.
pub trait Fringe {
    /// Adds a node with its estimated total cost (path cost plus heuristic).
    fn push(&mut self, estimate: u32, node: NodeIndex) -> Result<(), TryReserveError>;

    fn pop(&mut self) -> Option<NodeIndex>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Entry {
    estimate: u32,
    sequence: u64,
    node: NodeIndex,
}

// Reversed so that the max-heap pops the lowest estimate, oldest first.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pops the node with the lowest estimate; equal estimates come out in
/// insertion order.
#[derive(Debug, Default)]
pub struct PriorityFringe {
    heap: BinaryHeap<Entry>,
    sequence: u64,
}

impl Fringe for PriorityFringe {
    fn push(&mut self, estimate: u32, node: NodeIndex) -> Result<(), TryReserveError> {
        self.heap.try_reserve(1)?;
        self.heap.push(Entry {
            estimate,
            sequence: self.sequence,
            node,
        });
        self.sequence += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<NodeIndex> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Ignores estimates and pops in insertion order, giving a breadth-first search.
#[derive(Debug, Default)]
pub struct FifoFringe {
    queue: VecDeque<NodeIndex>,
}

impl Fringe for FifoFringe {
    fn push(&mut self, _estimate: u32, node: NodeIndex) -> Result<(), TryReserveError> {
        self.queue.try_reserve(1)?;
        self.queue.push_back(node);
        Ok(())
    }

    fn pop(&mut self) -> Option<NodeIndex> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(fringe: &mut impl Fringe) -> Vec<NodeIndex> {
        std::iter::from_fn(|| fringe.pop()).collect()
    }

    #[test]
    fn test_priority_fringe_breaks_ties_by_insertion() {
        let mut fringe = PriorityFringe::default();
        assert!(fringe.is_empty());
        for (estimate, node) in [(5, 0), (3, 1), (5, 2), (3, 3), (4, 4), (3, 5)] {
            fringe.push(estimate, node).unwrap();
        }
        assert_eq!(fringe.len(), 6);
        assert_eq!(drain(&mut fringe), vec![1, 3, 5, 4, 0, 2]);
        assert_eq!(fringe.pop(), None);
    }

    #[test]
    fn test_fifo_fringe() {
        let mut fringe = FifoFringe::default();
        for (estimate, node) in [(5, 0), (3, 1), (9, 2)] {
            fringe.push(estimate, node).unwrap();
        }
        assert_eq!(drain(&mut fringe), vec![0, 1, 2]);
        assert!(fringe.is_empty());
    }
}
