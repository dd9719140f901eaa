//! Feed dispatcher: parses one command line, routes it to the right book,
//! and maintains the order-id→symbol registry and subscription state.
//!
//! `out`/`err` are injected closures rather than globals — the same shape
//! as the original's `callback_t`/`err_callback_t` — so the dispatcher can
//! be driven and asserted against in tests without touching stdout/stderr.

use crate::book::OrderBook;
use crate::error::{FeedError, Result};
use crate::format;
use crate::subscriptions::{self, BboSubs, VwapSubs};
use crate::types::{Order, OrderId, Side};
use std::collections::HashMap;

enum Command {
    OrderAdd,
    OrderModify,
    OrderCancel,
    SubscribeBbo,
    UnsubscribeBbo,
    SubscribeVwap,
    UnsubscribeVwap,
    Print,
    PrintFull,
}

fn parse_command_token(line: &str) -> Option<Command> {
    let token = line.split(',').next().unwrap_or("");
    match token {
        "ORDER ADD" => Some(Command::OrderAdd),
        "ORDER MODIFY" => Some(Command::OrderModify),
        "ORDER CANCEL" => Some(Command::OrderCancel),
        "SUBSCRIBE BBO" => Some(Command::SubscribeBbo),
        "UNSUBSCRIBE BBO" => Some(Command::UnsubscribeBbo),
        "SUBSCRIBE VWAP" => Some(Command::SubscribeVwap),
        "UNSUBSCRIBE VWAP" => Some(Command::UnsubscribeVwap),
        "PRINT" => Some(Command::Print),
        "PRINT_FULL" => Some(Command::PrintFull),
        _ => None,
    }
}

/// Splits `line` on `,`, drops the command token, and checks the
/// remaining field count against `expected`.
fn parse_args(line: &str, expected: usize) -> Result<Vec<&str>> {
    let mut parts = line.split(',');
    parts.next();
    let args: Vec<&str> = parts.collect();
    if args.len() != expected {
        return Err(FeedError::ArityMismatch);
    }
    Ok(args)
}

fn parse_order_id(token: &str) -> Result<u64> {
    token.parse().map_err(|_| FeedError::InvalidOrderId)
}

fn parse_symbol(token: &str) -> Result<String> {
    if token.is_empty() {
        Err(FeedError::InvalidSymbol)
    } else {
        Ok(token.to_string())
    }
}

fn parse_side(token: &str) -> Result<Side> {
    match token {
        "Buy" => Ok(Side::Buy),
        "Sell" => Ok(Side::Sell),
        _ => Err(FeedError::InvalidSide),
    }
}

fn parse_quantity(token: &str) -> Result<u64> {
    token.parse().map_err(|_| FeedError::InvalidQuantity)
}

fn parse_price(token: &str) -> Result<f64> {
    token.parse().map_err(|_| FeedError::InvalidPrice)
}

/// Dispatcher state: owns every per-symbol book, the id→symbol registry,
/// and both subscription counters, plus the injected output/error sinks.
pub struct FeedHandler<O, E> {
    selected_symbol: Option<String>,
    books: HashMap<String, OrderBook>,
    order_symbols: HashMap<OrderId, String>,
    bbo_subs: BboSubs,
    vwap_subs: VwapSubs,
    out: O,
    err: E,
}

impl<O, E> FeedHandler<O, E>
where
    O: FnMut(&str),
    E: FnMut(&str, &str),
{
    pub fn new(selected_symbol: Option<String>, out: O, err: E) -> Self {
        Self {
            selected_symbol,
            books: HashMap::new(),
            order_symbols: HashMap::new(),
            bbo_subs: BboSubs::new(),
            vwap_subs: VwapSubs::new(),
            out,
            err,
        }
    }

    /// Parses, routes, and applies one input line, then emits every active
    /// subscription's line. Runs unconditionally, even if the command was
    /// unrecognized, malformed, filtered out, or failed against a book.
    pub fn process_command(&mut self, line: &str) {
        if let Err(e) = self.dispatch(line) {
            (self.err)(line, &e.to_string());
        }
        self.emit_subscriptions();
    }

    fn should_handle(&self, symbol: &str) -> bool {
        match &self.selected_symbol {
            Some(selected) => selected == symbol,
            None => true,
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<()> {
        let command = parse_command_token(line).ok_or(FeedError::UnknownCommand)?;
        match command {
            Command::OrderAdd => self.handle_order_add(line),
            Command::OrderModify => self.handle_order_modify(line),
            Command::OrderCancel => self.handle_order_cancel(line),
            Command::SubscribeBbo => self.handle_subscribe_bbo(line),
            Command::UnsubscribeBbo => self.handle_unsubscribe_bbo(line),
            Command::SubscribeVwap => self.handle_subscribe_vwap(line),
            Command::UnsubscribeVwap => self.handle_unsubscribe_vwap(line),
            Command::Print => self.handle_print(line),
            Command::PrintFull => self.handle_print_full(line),
        }
    }

    fn handle_order_add(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 5)?;
        let id = parse_order_id(args[0])?;
        let symbol = parse_symbol(args[1])?;
        if !self.should_handle(&symbol) {
            return Ok(());
        }
        let side = parse_side(args[2])?;
        let quantity = parse_quantity(args[3])?;
        let price = parse_price(args[4])?;

        let book = self
            .books
            .entry(symbol.clone())
            .or_insert_with(|| OrderBook::new(symbol.clone()));
        book.add(OrderId(id), side, quantity, price)?;
        self.order_symbols.insert(OrderId(id), symbol);
        Ok(())
    }

    fn handle_order_modify(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 3)?;
        let id = parse_order_id(args[0])?;
        let quantity = parse_quantity(args[1])?;
        let price = parse_price(args[2])?;

        let symbol = self
            .order_symbols
            .get(&OrderId(id))
            .cloned()
            .ok_or(FeedError::NoOrderBookForOrder(id))?;
        let book = self
            .books
            .get_mut(&symbol)
            .ok_or(FeedError::NoOrderBookForOrder(id))?;
        book.modify(OrderId(id), quantity, price)?;
        Ok(())
    }

    fn handle_order_cancel(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 1)?;
        let id = parse_order_id(args[0])?;

        let symbol = self
            .order_symbols
            .get(&OrderId(id))
            .cloned()
            .ok_or(FeedError::NoOrderBookForOrder(id))?;
        let book = self
            .books
            .get_mut(&symbol)
            .ok_or(FeedError::NoOrderBookForOrder(id))?;
        book.cancel(OrderId(id))?;
        self.order_symbols.remove(&OrderId(id));
        Ok(())
    }

    fn handle_subscribe_bbo(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 1)?;
        let symbol = parse_symbol(args[0])?;
        if !self.should_handle(&symbol) {
            return Ok(());
        }
        subscriptions::subscribe(&mut self.bbo_subs, symbol);
        Ok(())
    }

    /// Does not apply the symbol filter: this mirrors the original
    /// source's asymmetry (spec.md §9), which is safe because decrementing
    /// a counter that was never incremented is already a no-op.
    fn handle_unsubscribe_bbo(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 1)?;
        let symbol = parse_symbol(args[0])?;
        subscriptions::unsubscribe(&mut self.bbo_subs, &symbol);
        Ok(())
    }

    fn handle_subscribe_vwap(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 2)?;
        let symbol = parse_symbol(args[0])?;
        let quantity = parse_quantity(args[1])?;
        if !self.should_handle(&symbol) {
            return Ok(());
        }
        subscriptions::subscribe(&mut self.vwap_subs, (symbol, quantity));
        Ok(())
    }

    fn handle_unsubscribe_vwap(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 2)?;
        let symbol = parse_symbol(args[0])?;
        let quantity = parse_quantity(args[1])?;
        if !self.should_handle(&symbol) {
            return Ok(());
        }
        subscriptions::unsubscribe(&mut self.vwap_subs, &(symbol, quantity));
        Ok(())
    }

    fn handle_print(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 1)?;
        let symbol = parse_symbol(args[0])?;
        if !self.should_handle(&symbol) {
            return Ok(());
        }
        if let Some(book) = self.books.get(&symbol) {
            for (bid, ask) in book.price_levels() {
                (self.out)(&format::price_level_line(bid, ask));
            }
        }
        Ok(())
    }

    fn handle_print_full(&mut self, line: &str) -> Result<()> {
        let args = parse_args(line, 1)?;
        let symbol = parse_symbol(args[0])?;
        if !self.should_handle(&symbol) {
            return Ok(());
        }
        if let Some(book) = self.books.get(&symbol) {
            let [top, header, rule] = format::full_depth_header();
            (self.out)(&top);
            (self.out)(&header);
            (self.out)(&rule);
            for (bid, ask) in book.full_depth() {
                (self.out)(&format::full_depth_line(bid, ask));
            }
            (self.out)(&format::full_depth_footer());
        }
        Ok(())
    }

    fn emit_subscriptions(&mut self) {
        if !self.bbo_subs.is_empty() {
            let books = &self.books;
            let lines = subscriptions::render_bbo_lines(&self.bbo_subs, |s| books.get(s));
            for line in lines {
                (self.out)(&line);
            }
        }
        if !self.vwap_subs.is_empty() {
            let books = &self.books;
            let lines = subscriptions::render_vwap_lines(&self.vwap_subs, |s| books.get(s));
            for line in lines {
                (self.out)(&line);
            }
        }
    }

    // --- read-only accessors, supplementing spec.md with the original's API ---

    pub fn is_there_selected_symbol(&self) -> bool {
        self.selected_symbol.is_some()
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.selected_symbol.as_deref()
    }

    pub fn number_order_books(&self) -> usize {
        self.books.len()
    }

    pub fn get_order(&self, symbol: &str, id: OrderId) -> Option<&Order> {
        if !self.should_handle(symbol) {
            return None;
        }
        self.books.get(symbol).and_then(|b| b.get_order(id))
    }

    pub fn is_there_symbol_for_order(&self, id: OrderId) -> bool {
        self.order_symbols.contains_key(&id)
    }

    pub fn symbol_for_order(&self, id: OrderId) -> Option<&str> {
        self.order_symbols.get(&id).map(String::as_str)
    }

    pub fn bbo_subs_count(&self, symbol: &str) -> u32 {
        *self.bbo_subs.get(symbol).unwrap_or(&0)
    }

    pub fn vwap_subs_count(&self, symbol: &str, quantity: u64) -> u32 {
        *self.vwap_subs.get(&(symbol.to_string(), quantity)).unwrap_or(&0)
    }
}
