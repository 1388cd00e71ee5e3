//! Level - the FIFO queue of resting orders at a single price.
//!
//! Implemented as an intrusive doubly-linked list over arena indices:
//! O(1) append at the tail and O(1) unlink from any position. Quantity
//! totals are not cached here; snapshot aggregation walks the queue and
//! sums on demand.

use crate::arena::{Arena, NodeIndex, OrderNode, NIL};

/// A queue of orders at a specific price, oldest (highest priority) first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Level {
    /// Index of the oldest order (front of the queue)
    pub head: NodeIndex,
    /// Index of the newest order (back of the queue)
    pub tail: NodeIndex,
    /// Number of orders at this level
    pub count: u32,
}

impl Level {
    /// Create a new empty level
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: NIL,
            tail: NIL,
            count: 0,
        }
    }

    /// Returns true if there are no orders at this level
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of orders at this level
    #[inline]
    pub const fn len(&self) -> u32 {
        self.count
    }

    /// Append an order to the tail of the queue (lowest time priority).
    ///
    /// # Complexity
    /// O(1)
    #[inline]
    pub fn push_back(&mut self, arena: &mut Arena, index: NodeIndex) {
        if self.tail == NIL {
            // Empty queue: new node becomes both head and tail
            debug_assert!(self.head == NIL);
            self.head = index;
            self.tail = index;
            arena.get_mut(index).prev = NIL;
            arena.get_mut(index).next = NIL;
        } else {
            arena.get_mut(self.tail).next = index;
            arena.get_mut(index).prev = self.tail;
            arena.get_mut(index).next = NIL;
            self.tail = index;
        }

        self.count += 1;
    }

    /// Unlink an order from anywhere in the queue (cancel / price amend).
    ///
    /// Handles all positions: only node, head, tail, middle. The node is
    /// NOT freed from the arena; the caller owns that step.
    ///
    /// # Returns
    /// `true` if the level is now empty, `false` otherwise.
    ///
    /// # Complexity
    /// O(1)
    #[inline]
    pub fn unlink(&mut self, arena: &mut Arena, index: NodeIndex) -> bool {
        let node = arena.get(index);
        let prev_idx = node.prev;
        let next_idx = node.next;

        if prev_idx == NIL && next_idx == NIL {
            // Only node in the level
            debug_assert!(self.head == index && self.tail == index);
            self.head = NIL;
            self.tail = NIL;
        } else if prev_idx == NIL {
            // Removing the head
            debug_assert!(self.head == index);
            self.head = next_idx;
            arena.get_mut(next_idx).prev = NIL;
        } else if next_idx == NIL {
            // Removing the tail
            debug_assert!(self.tail == index);
            self.tail = prev_idx;
            arena.get_mut(prev_idx).next = NIL;
        } else {
            // Removing from the middle
            arena.get_mut(prev_idx).next = next_idx;
            arena.get_mut(next_idx).prev = prev_idx;
        }

        self.count -= 1;

        // Clear the removed node's linkage
        arena.get_mut(index).prev = NIL;
        arena.get_mut(index).next = NIL;

        self.count == 0
    }

    /// Iterate the queue front-to-back (time priority order).
    #[inline]
    pub fn iter<'a>(&self, arena: &'a Arena) -> LevelIter<'a> {
        LevelIter {
            arena,
            cursor: self.head,
        }
    }

    /// Sum of quantities over every order currently at this level.
    ///
    /// Recomputed on each call by walking the queue.
    #[inline]
    pub fn total_qty(&self, arena: &Arena) -> u64 {
        self.iter(arena).map(|node| node.qty).sum()
    }
}

/// Front-to-back iterator over the nodes of one level.
pub struct LevelIter<'a> {
    arena: &'a Arena,
    cursor: NodeIndex,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a OrderNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = self.arena.get(self.cursor);
        self.cursor = node.next;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Order, Side};

    fn fill(arena: &mut Arena, count: u64) -> Vec<NodeIndex> {
        (0..count)
            .map(|i| {
                arena
                    .alloc(&Order {
                        id: i,
                        side: Side::Bid,
                        price: 10000,
                        qty: 100,
                        ts_ns: i,
                    })
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_level() {
        let arena = Arena::new(1);
        let level = Level::new();
        assert!(level.is_empty());
        assert_eq!(level.count, 0);
        assert_eq!(level.head, NIL);
        assert_eq!(level.tail, NIL);
        assert_eq!(level.total_qty(&arena), 0);
    }

    #[test]
    fn test_push_single() {
        let mut arena = Arena::new(10);
        let mut level = Level::new();
        let indices = fill(&mut arena, 1);

        level.push_back(&mut arena, indices[0]);

        assert!(!level.is_empty());
        assert_eq!(level.count, 1);
        assert_eq!(level.head, indices[0]);
        assert_eq!(level.tail, indices[0]);
        assert_eq!(level.total_qty(&arena), 100);
    }

    #[test]
    fn test_push_multiple_fifo() {
        let mut arena = Arena::new(10);
        let mut level = Level::new();
        let indices = fill(&mut arena, 3);

        for &idx in &indices {
            level.push_back(&mut arena, idx);
        }

        assert_eq!(level.count, 3);
        assert_eq!(level.head, indices[0]);
        assert_eq!(level.tail, indices[2]);

        // Verify linkage
        assert_eq!(arena.get(indices[0]).next, indices[1]);
        assert_eq!(arena.get(indices[1]).prev, indices[0]);
        assert_eq!(arena.get(indices[1]).next, indices[2]);
        assert_eq!(arena.get(indices[2]).prev, indices[1]);

        // Iteration yields arrival order
        let ids: Vec<u64> = level.iter(&arena).map(|n| n.order_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_unlink_only_node() {
        let mut arena = Arena::new(10);
        let mut level = Level::new();
        let indices = fill(&mut arena, 1);
        level.push_back(&mut arena, indices[0]);

        let is_empty = level.unlink(&mut arena, indices[0]);

        assert!(is_empty);
        assert!(level.is_empty());
        assert_eq!(level.head, NIL);
        assert_eq!(level.tail, NIL);
    }

    #[test]
    fn test_unlink_head() {
        let mut arena = Arena::new(10);
        let mut level = Level::new();
        let indices = fill(&mut arena, 3);
        for &idx in &indices {
            level.push_back(&mut arena, idx);
        }

        let is_empty = level.unlink(&mut arena, indices[0]);

        assert!(!is_empty);
        assert_eq!(level.count, 2);
        assert_eq!(level.head, indices[1]);
        assert_eq!(arena.get(indices[1]).prev, NIL);
    }

    #[test]
    fn test_unlink_tail() {
        let mut arena = Arena::new(10);
        let mut level = Level::new();
        let indices = fill(&mut arena, 3);
        for &idx in &indices {
            level.push_back(&mut arena, idx);
        }

        let is_empty = level.unlink(&mut arena, indices[2]);

        assert!(!is_empty);
        assert_eq!(level.count, 2);
        assert_eq!(level.tail, indices[1]);
        assert_eq!(arena.get(indices[1]).next, NIL);
    }

    #[test]
    fn test_unlink_middle() {
        let mut arena = Arena::new(10);
        let mut level = Level::new();
        let indices = fill(&mut arena, 3);
        for &idx in &indices {
            level.push_back(&mut arena, idx);
        }

        let is_empty = level.unlink(&mut arena, indices[1]);

        assert!(!is_empty);
        assert_eq!(level.count, 2);
        assert_eq!(arena.get(indices[0]).next, indices[2]);
        assert_eq!(arena.get(indices[2]).prev, indices[0]);

        let ids: Vec<u64> = level.iter(&arena).map(|n| n.order_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_total_qty_tracks_mutation() {
        let mut arena = Arena::new(10);
        let mut level = Level::new();
        let indices = fill(&mut arena, 3);
        for &idx in &indices {
            level.push_back(&mut arena, idx);
        }
        assert_eq!(level.total_qty(&arena), 300);

        // Amend-in-place: mutate a node's qty directly, no level bookkeeping
        arena.get_mut(indices[1]).qty = 250;
        assert_eq!(level.total_qty(&arena), 450);

        level.unlink(&mut arena, indices[1]);
        assert_eq!(level.total_qty(&arena), 200);
    }
}
