//! Caller-facing order types and fixed-point price helpers.
//!
//! The core works exclusively in integer price ticks; decimal conversion
//! happens at the edges (drivers, file replay).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Price ticks per whole currency unit (2 decimal places: $100.50 -> 10050)
pub const TICKS_PER_UNIT: u64 = 100;

/// Decimal places encoded in a price tick
pub const PRICE_SCALE: u32 = 2;

/// Convert a decimal price to integer ticks.
///
/// Returns `None` if the price does not fit in a `u64` (negative or
/// astronomically large).
#[inline]
pub fn decimal_to_ticks(price: Decimal) -> Option<u64> {
    (price * Decimal::from(TICKS_PER_UNIT)).to_u64()
}

/// Convert integer ticks back to a decimal price.
#[inline]
pub fn ticks_to_decimal(ticks: u64) -> Decimal {
    Decimal::new(ticks as i64, PRICE_SCALE)
}

/// Order side (bid = buy, ask = sell)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Buy side (bids)
    Bid = 0,
    /// Sell side (asks)
    Ask = 1,
}

impl Side {
    /// Returns the opposite side
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// A fully-formed limit order as supplied by the caller.
///
/// The engine performs no validation: zero prices or quantities are
/// accepted and rest in the book as given. Pre-validation is the caller's
/// responsibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    /// External order ID (client-assigned, unique among resting orders)
    pub id: u64,
    /// Order side (bid/ask)
    pub side: Side,
    /// Fixed-point price in ticks (e.g., $100.50 -> 10050)
    pub price: u64,
    /// Order quantity
    pub qty: u64,
    /// Arrival timestamp in nanoseconds; only breaks ties within a price
    pub ts_ns: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_decimal_round_trip() {
        let price = Decimal::from_str("100.50").unwrap();
        let ticks = decimal_to_ticks(price).unwrap();
        assert_eq!(ticks, 10050);
        assert_eq!(ticks_to_decimal(ticks), price);
    }

    #[test]
    fn test_negative_price_rejected_by_conversion() {
        let price = Decimal::from_str("-1.00").unwrap();
        assert_eq!(decimal_to_ticks(price), None);
    }
}
