//! Console driver exercising the storage engine with the reference
//! scenario: a burst of adds, a cancel, both amend paths, and aggregated
//! snapshots after each step.
//!
//! The driver knows nothing about ledgers or locators; it builds `Order`
//! values and renders `AggregatedLevel`s.

use chrono::Utc;
use clap::Parser;
use depthbook::{ticks_to_decimal, AggregatedLevel, Book, Order, Side};

#[derive(Parser, Debug)]
#[command(about = "Run the reference order book scenario")]
struct Args {
    /// Levels per side to show in each snapshot
    #[arg(long, default_value_t = 5)]
    depth: usize,
}

/// Nanosecond arrival timestamps; the engine only uses them to break ties
/// within a price, so wall-clock is fine here.
fn now_ns() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(0) as u64
}

fn order(id: u64, side: Side, price: u64, qty: u64) -> Order {
    Order {
        id,
        side,
        price,
        qty,
        ts_ns: now_ns(),
    }
}

fn print_side(label: &str, levels: &[AggregatedLevel], reversed: bool) {
    println!("--- {label} ---");
    let render = |l: &AggregatedLevel| println!("  {} | {}", ticks_to_decimal(l.price), l.total_qty);
    if reversed {
        levels.iter().rev().for_each(render);
    } else {
        levels.iter().for_each(render);
    }
}

fn print_book(book: &Book, depth: usize) {
    let snap = book.snapshot(depth);

    println!("\n========== ORDER BOOK ==========\n");
    // Asks reversed: best ask sits closest to the spread line
    print_side("ASKS", &snap.asks, true);
    println!("------------");
    print_side("BIDS", &snap.bids, false);
    println!("\n================================\n");
}

fn main() {
    let args = Args::parse();
    let mut book = Book::new();

    println!("Testing Order Book Implementation");
    println!("==================================\n");

    println!("Adding buy orders...");
    book.add_order(&order(1, Side::Bid, 10050, 10));
    book.add_order(&order(2, Side::Bid, 10050, 5));
    book.add_order(&order(3, Side::Bid, 10000, 20));
    book.add_order(&order(4, Side::Bid, 9950, 15));

    println!("Adding sell orders...");
    book.add_order(&order(5, Side::Ask, 10100, 8));
    book.add_order(&order(6, Side::Ask, 10150, 12));
    book.add_order(&order(7, Side::Ask, 10100, 7));
    book.add_order(&order(8, Side::Ask, 10200, 25));

    print_book(&book, args.depth);

    println!("Canceling order 2 (buy @ 100.50)...");
    if book.cancel_order(2) {
        println!("Order cancelled successfully");
    }
    print_book(&book, args.depth);

    println!("Amending order 3 quantity from 20 to 30...");
    if book.amend_order(3, 10000, 30) {
        println!("Order amended successfully");
    }
    print_book(&book, args.depth);

    println!("Amending order 4 price from 99.50 to 100.25...");
    if book.amend_order(4, 10025, 15) {
        println!("Order amended successfully");
    }
    print_book(&book, args.depth);

    println!("Getting snapshot (depth 3)...");
    let snap = book.snapshot(3);
    println!("\nBids:");
    for level in &snap.bids {
        println!("  Price: {}, Qty: {}", ticks_to_decimal(level.price), level.total_qty);
    }
    println!("\nAsks:");
    for level in &snap.asks {
        println!("  Price: {}, Qty: {}", ticks_to_decimal(level.price), level.total_qty);
    }

    println!("\n\nAdding more orders for aggregation test...");
    book.add_order(&order(9, Side::Bid, 10050, 100));
    book.add_order(&order(10, Side::Bid, 10050, 50));
    book.add_order(&order(11, Side::Ask, 10100, 30));

    print_book(&book, args.depth);

    println!("\nAll tests completed!");
}
