//! Snapshot - depth-limited aggregated views of the book.
//!
//! Aggregation is purely derived: each call walks the ledger best-first,
//! stops after `depth` levels, and sums order quantities by traversing the
//! level's queue. Nothing here mutates or caches book state.

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::ledger::Ledger;

/// One aggregated price level: price plus the summed quantity of every
/// order currently resting there. Output-only; never stored by the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLevel {
    /// Fixed-point price in ticks
    pub price: u64,
    /// Sum of quantities over all orders at this price
    pub total_qty: u64,
}

/// A depth-limited view of both sides, each ordered best-first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// Bid levels, highest price first, at most `depth` entries
    pub bids: Vec<AggregatedLevel>,
    /// Ask levels, lowest price first, at most `depth` entries
    pub asks: Vec<AggregatedLevel>,
}

/// Aggregate one side up to `depth` levels.
///
/// `depth = 0` yields an empty vector.
pub fn aggregate(ledger: &Ledger, arena: &Arena, depth: usize) -> Vec<AggregatedLevel> {
    ledger
        .iter()
        .take(depth)
        .map(|(price, level)| AggregatedLevel {
            price,
            total_qty: level.total_qty(arena),
        })
        .collect()
}
