//! Ledger - the ordered collection of price levels on one side.
//!
//! A `BTreeMap` keyed by price ticks gives the side its canonical
//! iteration order directly: bids walk descending (best bid first), asks
//! ascending (best ask first). Levels exist only while non-empty.

use std::collections::BTreeMap;

use crate::level::Level;
use crate::order::Side;

/// Price-ordered levels for one side of the book.
#[derive(Debug)]
pub struct Ledger {
    side: Side,
    levels: BTreeMap<u64, Level>,
}

impl Ledger {
    /// Create an empty ledger for the given side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// The side this ledger holds
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Get the level at `price`, if present
    #[inline]
    pub fn level(&self, price: u64) -> Option<&Level> {
        self.levels.get(&price)
    }

    /// Get the level at `price` mutably, if present
    #[inline]
    pub fn level_mut(&mut self, price: u64) -> Option<&mut Level> {
        self.levels.get_mut(&price)
    }

    /// Get or create the level at `price`
    #[inline]
    pub fn or_insert(&mut self, price: u64) -> &mut Level {
        self.levels.entry(price).or_insert_with(Level::new)
    }

    /// Drop the level at `price`. Callers invoke this the moment a level
    /// empties; tombstones are never left behind.
    #[inline]
    pub fn remove_level(&mut self, price: u64) {
        self.levels.remove(&price);
    }

    /// Best price on this side: highest bid, lowest ask.
    #[inline]
    pub fn best(&self) -> Option<u64> {
        match self.side {
            Side::Bid => self.levels.keys().next_back().copied(),
            Side::Ask => self.levels.keys().next().copied(),
        }
    }

    /// Number of distinct price levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns true if the side has no resting orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Remove every level
    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Iterate levels best-first: descending prices for bids, ascending
    /// for asks.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Level)> + '_ {
        let inner: Box<dyn Iterator<Item = (&u64, &Level)>> = match self.side {
            Side::Bid => Box::new(self.levels.iter().rev()),
            Side::Ask => Box::new(self.levels.iter()),
        };
        inner.map(|(price, level)| (*price, level))
    }
}
