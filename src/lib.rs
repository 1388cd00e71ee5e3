//! # Depthbook
//!
//! A resting-order storage engine for a price-time priority limit order book.
//!
//! ## Design Principles
//!
//! - **Single-Writer**: One caller owns the book exclusively (no locks)
//! - **O(1) Mutations**: Add, Cancel, Amend all run in constant time via
//!   an order-id locator registry
//! - **Arena Allocation**: Orders live in a pre-allocated slab; price-level
//!   queues link arena indices, never raw pointers
//! - **Storage Only**: Crossing bids and asks are never matched into trades;
//!   execution belongs to a layer above this engine
//!
//! ## Architecture
//!
//! ```text
//! [Caller] --> [Book Facade] --> [Bid Ledger]  (BTreeMap, best-first desc)
//!                   |        --> [Ask Ledger]  (BTreeMap, best-first asc)
//!                   |        --> [Locator Registry] (order id -> slot)
//!                   +--> snapshot(depth) -> aggregated levels per side
//! ```

pub mod arena;
pub mod book;
pub mod ledger;
pub mod level;
pub mod order;
pub mod snapshot;

// Re-exports for convenience
pub use arena::{Arena, NodeIndex, OrderNode, NIL};
pub use book::{Book, Locator};
pub use ledger::Ledger;
pub use level::Level;
pub use order::{decimal_to_ticks, ticks_to_decimal, Order, Side, TICKS_PER_UNIT};
pub use snapshot::{AggregatedLevel, DepthSnapshot};
