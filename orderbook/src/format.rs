//! Deterministic text rendering for BBO, price-level, full-depth, and VWAP
//! output lines. All widths are column widths applied here, not padding
//! owned by the values themselves.

use crate::types::{Bbo, FullLevel, VolumePrice, Vwap};
use std::fmt::Write as _;

fn field(value: Option<VolumePrice>, width: usize, out: &mut String) {
    match value {
        Some(vp) => {
            let rendered = format!("{}@{}", vp.volume, vp.price);
            let _ = write!(out, "{:<width$}", rendered, width = width);
        }
        None => {
            let _ = write!(out, "{:<width$}", " ", width = width);
        }
    }
}

/// `BBO: <sym:10><field1:20> | <field2:20>`
pub fn bbo_line(symbol: &str, bbo: &Bbo) -> String {
    let mut out = String::from("BBO: ");
    let _ = write!(out, "{:<10}", symbol);
    field(bbo.buy, 20, &mut out);
    out.push_str(" | ");
    field(bbo.sell, 20, &mut out);
    out
}

/// `<field1:20> | <field2:20>` — one line per paired price level (`PRINT`).
pub fn price_level_line(bid: Option<VolumePrice>, ask: Option<VolumePrice>) -> String {
    let mut out = String::new();
    field(bid, 20, &mut out);
    out.push_str(" | ");
    field(ask, 20, &mut out);
    out
}

const FULL_DEPTH_RULE_WIDTH: usize = 60;
const FULL_DEPTH_COLUMN_WIDTH: usize = 10;

/// The three-line header block for `PRINT_FULL`: dash rule, column header,
/// dash rule.
pub fn full_depth_header() -> [String; 3] {
    let rule = "-".repeat(FULL_DEPTH_RULE_WIDTH);
    let mut header = String::new();
    for col in ["orders", "volume", "bid", "ask", "volume", "orders"] {
        let _ = write!(header, "{:<width$}", col, width = FULL_DEPTH_COLUMN_WIDTH);
    }
    [rule.clone(), header, rule]
}

/// One data line of `PRINT_FULL`: six width-10 columns, bids then asks.
/// An absent side renders as three blank columns.
pub fn full_depth_line(bid: Option<FullLevel>, ask: Option<FullLevel>) -> String {
    let mut out = String::new();
    write_full_side(bid, &mut out);
    write_full_side(ask, &mut out);
    out
}

fn write_full_side(level: Option<FullLevel>, out: &mut String) {
    match level {
        Some(l) => {
            let _ = write!(out, "{:<width$}", l.orders, width = FULL_DEPTH_COLUMN_WIDTH);
            let _ = write!(out, "{:<width$}", l.volume, width = FULL_DEPTH_COLUMN_WIDTH);
            let _ = write!(out, "{:<width$}", l.price, width = FULL_DEPTH_COLUMN_WIDTH);
        }
        None => {
            for _ in 0..3 {
                let _ = write!(out, "{:<width$}", "", width = FULL_DEPTH_COLUMN_WIDTH);
            }
        }
    }
}

/// The trailing dash rule for `PRINT_FULL`.
pub fn full_depth_footer() -> String {
    "-".repeat(FULL_DEPTH_RULE_WIDTH)
}

fn vwap_field(value: Option<f64>) -> String {
    match value {
        Some(p) => p.to_string(),
        None => "NIL".to_string(),
    }
}

/// `VWAP: <sym:10> <<buy>,<sell>>`
pub fn vwap_line(symbol: &str, vwap: &Vwap) -> String {
    let mut out = String::from("VWAP: ");
    let _ = write!(out, "{:<10}", symbol);
    let _ = write!(out, " <{},{}>", vwap_field(vwap.buy), vwap_field(vwap.sell));
    out
}
