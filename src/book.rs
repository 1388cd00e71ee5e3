//! Book - the facade over both ledgers and the locator registry.
//!
//! Every mutation updates exactly one ledger and the registry together;
//! a caller can never observe a locator without its order or an order
//! without its locator.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::arena::{Arena, NodeIndex};
use crate::ledger::Ledger;
use crate::order::{Order, Side};
use crate::snapshot::{aggregate, DepthSnapshot};

/// Where a resting order lives: side, price level, and the stable arena
/// handle of its node within that level's queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Locator {
    /// Side of the ledger holding the order
    pub side: Side,
    /// Price level key within that ledger
    pub price: u64,
    /// Arena handle of the order's node
    pub node: NodeIndex,
}

/// The resting-order storage engine.
///
/// Holds active orders on both sides, ordered by price and, within a
/// price, by arrival. Supports insertion, cancellation, in-place
/// amendment, and depth-limited aggregated snapshots. Matching is out of
/// scope: crossing bids and asks rest side by side untouched.
///
/// Inputs are not validated; zero prices or quantities rest in the book
/// exactly as given. Pre-validation is the caller's responsibility.
pub struct Book {
    /// Node storage shared by both sides
    arena: Arena,
    /// Bid levels, iterated highest price first
    bids: Ledger,
    /// Ask levels, iterated lowest price first
    asks: Ledger,
    /// Order id -> exact slot, for O(1) cancel/amend
    locators: FxHashMap<u64, Locator>,
}

/// Default order capacity when none is given
const DEFAULT_CAPACITY: u32 = 1 << 20;

impl Book {
    /// Create a book with the default order capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a book holding up to `capacity` resting orders.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            arena: Arena::new(capacity),
            bids: Ledger::new(Side::Bid),
            asks: Ledger::new(Side::Ask),
            locators: FxHashMap::with_capacity_and_hasher(capacity as usize, Default::default()),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a fully-formed order to the book.
    ///
    /// The order is appended to the tail of the FIFO queue at
    /// `(side, price)`, creating the level if absent, and becomes
    /// immediately visible to snapshots and addressable by cancel/amend.
    ///
    /// # Returns
    /// `false` if `order.id` is already resting (duplicate ids are
    /// rejected, nothing is mutated) or if the book is at capacity;
    /// `true` otherwise.
    pub fn add_order(&mut self, order: &Order) -> bool {
        if self.locators.contains_key(&order.id) {
            return false;
        }

        let Some(node) = self.arena.alloc(order) else {
            return false;
        };

        let ledger = match order.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        ledger.or_insert(order.price).push_back(&mut self.arena, node);

        self.locators.insert(
            order.id,
            Locator {
                side: order.side,
                price: order.price,
                node,
            },
        );

        true
    }

    /// Cancel a resting order by id.
    ///
    /// Unlinks the order from its level, drops the level if it emptied,
    /// and removes the locator. Idempotent: a second call on the same id
    /// returns `false` with no side effects.
    pub fn cancel_order(&mut self, id: u64) -> bool {
        let Some(loc) = self.locators.remove(&id) else {
            return false;
        };

        let ledger = match loc.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        if let Some(level) = ledger.level_mut(loc.price) {
            if level.unlink(&mut self.arena, loc.node) {
                ledger.remove_level(loc.price);
            }
        }

        self.arena.free(loc.node);
        true
    }

    /// Amend a resting order's price and quantity.
    ///
    /// Same price: quantity is updated in place and the order keeps its
    /// FIFO position (the O(1) fast path). Different price: the order is
    /// unlinked from its old level and re-queued at the tail of the
    /// destination level; time priority is lost.
    ///
    /// # Returns
    /// `false` if no order with `id` is resting.
    pub fn amend_order(&mut self, id: u64, new_price: u64, new_qty: u64) -> bool {
        let Some(&loc) = self.locators.get(&id) else {
            return false;
        };

        if loc.price == new_price {
            // Quantity-only amend preserves time priority
            self.arena.get_mut(loc.node).qty = new_qty;
            return true;
        }

        // Price change: remove from the old level, re-queue at the tail of
        // the new one. The node keeps its arrival timestamp; priority loss
        // comes from the tail position, not the clock.
        let ledger = match loc.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        if let Some(level) = ledger.level_mut(loc.price) {
            if level.unlink(&mut self.arena, loc.node) {
                ledger.remove_level(loc.price);
            }
        }

        let node = self.arena.get_mut(loc.node);
        node.price = new_price;
        node.qty = new_qty;

        ledger.or_insert(new_price).push_back(&mut self.arena, loc.node);

        self.locators.insert(
            id,
            Locator {
                price: new_price,
                ..loc
            },
        );

        true
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Aggregate both sides up to `depth` levels each.
    ///
    /// Bids come back highest price first, asks lowest price first, each
    /// with at most `depth` entries. Read-only; `depth = 0` yields two
    /// empty vectors.
    pub fn snapshot(&self, depth: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: aggregate(&self.bids, &self.arena, depth),
            asks: aggregate(&self.asks, &self.arena, depth),
        }
    }

    // ========================================================================
    // Lookups & utilities
    // ========================================================================

    /// Reconstruct the caller-facing view of a resting order.
    pub fn order(&self, id: u64) -> Option<Order> {
        let loc = self.locators.get(&id)?;
        let node = self.arena.get(loc.node);
        Some(Order {
            id,
            side: loc.side,
            price: node.price,
            qty: node.qty,
            ts_ns: node.ts_ns,
        })
    }

    /// Check whether an order is currently resting.
    #[inline]
    pub fn contains_order(&self, id: u64) -> bool {
        self.locators.contains_key(&id)
    }

    /// Best bid price (highest buy price)
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best()
    }

    /// Best ask price (lowest sell price)
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best()
    }

    /// Spread (best_ask - best_bid), when both sides are populated and
    /// not crossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask > bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.locators.len()
    }

    /// Number of distinct bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Returns true if no orders are resting
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Remove every order from the book
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.locators.clear();
        self.arena.clear();
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("best_bid", &self.best_bid())
            .field("best_ask", &self.best_ask())
            .field("bid_levels", &self.bids.len())
            .field("ask_levels", &self.asks.len())
            .field("order_count", &self.locators.len())
            .finish()
    }
}
