//! Arena - O(1) slab allocator for resting-order nodes.
//!
//! The arena pre-allocates a contiguous block of nodes at startup and
//! threads a free list through unused slots. Price-level queues reference
//! nodes by `u32` index, never by address, so no handle is ever invalidated
//! by growth or by removals elsewhere in the structure.

use std::fmt;

use crate::order::Order;

/// Sentinel value representing a null/invalid index (like nullptr)
pub const NIL: u32 = u32::MAX;

/// Type alias for arena indices - stable, compressed order handles
pub type NodeIndex = u32;

/// A single resting order - exactly 64 bytes (one cache line).
///
/// # Memory Layout
///
/// | Field      | Type    | Offset | Size |
/// |------------|---------|--------|------|
/// | price      | u64     | 0      | 8    |
/// | qty        | u64     | 8      | 8    |
/// | order_id   | u64     | 16     | 8    |
/// | ts_ns      | u64     | 24     | 8    |
/// | next       | u32     | 32     | 4    |
/// | prev       | u32     | 36     | 4    |
/// | _reserved  | [u8;24] | 40     | 24   |
/// | **Total**  |         |        | 64   |
#[repr(C)]
#[repr(align(64))]
#[derive(Clone, Copy)]
pub struct OrderNode {
    /// Fixed-point price in ticks (e.g., $100.50 -> 10050)
    pub price: u64,

    /// Remaining quantity
    pub qty: u64,

    /// External order ID (for caller tracking)
    pub order_id: u64,

    /// Arrival timestamp in nanoseconds (tie-break within a price level)
    pub ts_ns: u64,

    /// Index of next order at the same price level (toward the tail)
    pub next: NodeIndex,

    /// Index of previous order (enables O(1) unlink from any position)
    pub prev: NodeIndex,

    pub _reserved: [u8; 24],
}

// Compile-time assertions: OrderNode must be exactly one cache line
const _: () = assert!(
    std::mem::size_of::<OrderNode>() == 64,
    "OrderNode must be exactly 64 bytes (one cache line)"
);
const _: () = assert!(
    std::mem::align_of::<OrderNode>() == 64,
    "OrderNode must be 64-byte aligned"
);

impl OrderNode {
    /// Create an empty/uninitialized node (for the free list)
    #[inline]
    pub const fn empty() -> Self {
        Self {
            price: 0,
            qty: 0,
            order_id: 0,
            ts_ns: 0,
            next: NIL,
            prev: NIL,
            _reserved: [0u8; 24],
        }
    }

    /// Reset the node for reuse (when returning to the free list)
    #[inline]
    pub fn reset(&mut self) {
        self.price = 0;
        self.qty = 0;
        self.order_id = 0;
        self.ts_ns = 0;
        self.next = NIL;
        self.prev = NIL;
    }
}

impl fmt::Debug for OrderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderNode")
            .field("order_id", &self.order_id)
            .field("price", &self.price)
            .field("qty", &self.qty)
            .field("ts_ns", &self.ts_ns)
            .field("prev", &self.prev)
            .field("next", &self.next)
            .finish()
    }
}

/// Pre-allocated node pool with O(1) allocation and deallocation.
///
/// Uses a free list threaded through the `next` field of unused nodes.
pub struct Arena {
    /// Contiguous block of pre-allocated nodes
    nodes: Vec<OrderNode>,

    /// Head of the free list (index of first available node)
    free_head: NodeIndex,

    /// Number of currently allocated nodes
    allocated_count: u32,

    /// Total capacity
    capacity: u32,
}

impl Arena {
    /// Create a new arena holding up to `capacity` orders.
    ///
    /// # Panics
    /// Panics if capacity exceeds `u32::MAX - 1` (MAX is reserved for `NIL`)
    pub fn new(capacity: u32) -> Self {
        assert!(capacity < NIL, "Capacity must be less than NIL");

        let mut nodes = vec![OrderNode::empty(); capacity as usize];

        // Thread the free list through all nodes
        for i in 0..capacity.saturating_sub(1) {
            nodes[i as usize].next = i + 1;
        }
        if capacity > 0 {
            nodes[(capacity - 1) as usize].next = NIL;
        }

        Self {
            nodes,
            free_head: if capacity > 0 { 0 } else { NIL },
            allocated_count: 0,
            capacity,
        }
    }

    /// Allocate a node and populate it from `order`.
    ///
    /// Returns `None` if the arena is full.
    ///
    /// # Complexity
    /// O(1) - pops from the head of the free list
    #[inline]
    pub fn alloc(&mut self, order: &Order) -> Option<NodeIndex> {
        if self.free_head == NIL {
            return None;
        }

        let index = self.free_head;
        let node = &mut self.nodes[index as usize];
        self.free_head = node.next;
        self.allocated_count += 1;

        node.price = order.price;
        node.qty = order.qty;
        node.order_id = order.id;
        node.ts_ns = order.ts_ns;
        node.next = NIL;
        node.prev = NIL;

        Some(index)
    }

    /// Return a node to the free list.
    ///
    /// The caller must ensure the index was previously allocated and has
    /// not already been freed (no double-free protection).
    ///
    /// # Complexity
    /// O(1) - pushes to the head of the free list
    #[inline]
    pub fn free(&mut self, index: NodeIndex) {
        debug_assert!(index < self.capacity, "Index out of bounds");
        debug_assert!(self.allocated_count > 0, "Double free detected");

        self.nodes[index as usize].reset();
        self.nodes[index as usize].next = self.free_head;
        self.free_head = index;
        self.allocated_count -= 1;
    }

    /// Get an immutable reference to a node.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> &OrderNode {
        debug_assert!(index < self.capacity, "Index out of bounds");
        &self.nodes[index as usize]
    }

    /// Get a mutable reference to a node.
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> &mut OrderNode {
        debug_assert!(index < self.capacity, "Index out of bounds");
        &mut self.nodes[index as usize]
    }

    /// Returns the number of currently allocated nodes.
    #[inline]
    pub fn allocated(&self) -> u32 {
        self.allocated_count
    }

    /// Returns the total capacity of the arena.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns true if no nodes are allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.allocated_count == 0
    }

    /// Returns true if the arena has no free nodes left.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head == NIL
    }

    /// Drop every allocation and re-thread the free list.
    pub fn clear(&mut self) {
        for i in 0..self.capacity {
            self.nodes[i as usize].reset();
            self.nodes[i as usize].next = if i + 1 < self.capacity { i + 1 } else { NIL };
        }
        self.free_head = if self.capacity > 0 { 0 } else { NIL };
        self.allocated_count = 0;
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("allocated", &self.allocated_count)
            .field("free_head", &self.free_head)
            .finish()
    }
}
