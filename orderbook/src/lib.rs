//! Per-symbol limit order book and feed dispatcher for a market-data replay.
//!
//! Core pieces:
//! - [`book::OrderBook`] — one symbol's resting orders, indexed bid/ask ladders
//! - [`dispatcher::FeedHandler`] — parses feed lines, routes them to books,
//!   and maintains BBO/VWAP subscriptions
//! - [`format`] — the exact text layout `PRINT`/`PRINT_FULL`/`BBO`/`VWAP` emit
//!
//! No matching engine, no threading, no persistence: this crate only ever
//! tracks resting orders and answers queries against them.

pub mod book;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod price_levels;
pub mod subscriptions;
pub mod types;

pub use book::OrderBook;
pub use dispatcher::FeedHandler;
pub use error::{FeedError, Result};
pub use types::{Bbo, FullLevel, Order, OrderId, Side, VolumePrice, Vwap};
