//! Replay driver: applies a CSV stream of book operations and prints a
//! final aggregated snapshot.
//!
//! Expected columns: `op,id,side,price,qty` where `op` is one of
//! `add`, `cancel`, `amend`; `side` is `buy`/`bid` or `sell`/`ask`;
//! `price` is decimal. Cancel rows only need `op` and `id`.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;
use serde::Deserialize;

use depthbook::{decimal_to_ticks, ticks_to_decimal, Book, Order, Side};

#[derive(Parser, Debug)]
#[command(about = "Replay book operations from a CSV file")]
struct Args {
    /// CSV file of operations
    file: PathBuf,

    /// Levels per side in the final snapshot
    #[arg(long, default_value_t = 10)]
    depth: usize,
}

#[derive(Debug, Deserialize)]
struct OpRow {
    op: String,
    id: u64,
    side: Option<String>,
    price: Option<Decimal>,
    qty: Option<u64>,
}

impl OpRow {
    fn side(&self) -> Option<Side> {
        match self.side.as_deref() {
            Some("buy") | Some("bid") => Some(Side::Bid),
            Some("sell") | Some("ask") => Some(Side::Ask),
            _ => None,
        }
    }

    fn price_ticks(&self) -> Option<u64> {
        self.price.and_then(decimal_to_ticks)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut book = Book::new();

    let mut reader = csv::Reader::from_path(&args.file)?;
    let mut seq = 0u64;
    let mut applied = 0u64;
    let mut skipped = 0u64;

    for row in reader.deserialize() {
        let row: OpRow = row?;
        seq += 1;

        let ok = match row.op.as_str() {
            "add" => match (row.side(), row.price_ticks(), row.qty) {
                (Some(side), Some(price), Some(qty)) => book.add_order(&Order {
                    id: row.id,
                    side,
                    price,
                    qty,
                    // Row order stands in for arrival time
                    ts_ns: seq,
                }),
                _ => false,
            },
            "cancel" => book.cancel_order(row.id),
            "amend" => match (row.price_ticks(), row.qty) {
                (Some(price), Some(qty)) => book.amend_order(row.id, price, qty),
                _ => false,
            },
            _ => false,
        };

        if ok {
            applied += 1;
        } else {
            skipped += 1;
        }
    }

    println!("Replayed {} rows ({} applied, {} no-ops)", seq, applied, skipped);
    println!("Resting orders: {}", book.order_count());

    let snap = book.snapshot(args.depth);
    println!("\nAsks (best first):");
    for level in &snap.asks {
        println!("  {} | {}", ticks_to_decimal(level.price), level.total_qty);
    }
    println!("Bids (best first):");
    for level in &snap.bids {
        println!("  {} | {}", ticks_to_decimal(level.price), level.total_qty);
    }

    Ok(())
}
