//! BBO and VWAP subscription counters and the lines they render.
//!
//! Subscriptions are counted, not deduplicated: `SUBSCRIBE BBO` twice for
//! the same symbol still emits one line per command (the count gates
//! existence, not multiplicity), and `UNSUBSCRIBE` past zero is a no-op.
//! Both maps are `BTreeMap`s rather than the original's unordered map, so
//! emission order is deterministic (symbol, then symbol+quantity) — see
//! spec.md §9's open question on subscription iteration order.

use crate::book::OrderBook;
use crate::format;
use std::collections::BTreeMap;

pub type BboSubs = BTreeMap<String, u32>;
pub type VwapSubs = BTreeMap<(String, u64), u32>;

/// Increments the subscription count for `key`.
pub fn subscribe<K: Ord + Clone>(subs: &mut BTreeMap<K, u32>, key: K) {
    *subs.entry(key).or_insert(0) += 1;
}

/// Decrements the subscription count for `key`, removing it at zero.
/// A decrement past zero (key absent) is a no-op.
pub fn unsubscribe<K: Ord + Clone>(subs: &mut BTreeMap<K, u32>, key: &K) {
    if let Some(count) = subs.get_mut(key) {
        if *count <= 1 {
            subs.remove(key);
        } else {
            *count -= 1;
        }
    }
}

/// Renders one BBO line per active subscription, in symbol order. A
/// subscription for a symbol with no book yet is skipped entirely.
pub fn render_bbo_lines<'a>(
    subs: &BboSubs,
    books: impl Fn(&str) -> Option<&'a OrderBook>,
) -> Vec<String> {
    subs.keys()
        .filter_map(|symbol| books(symbol).map(|book| format::bbo_line(symbol, &book.bbo())))
        .collect()
}

/// Renders one VWAP line per active subscription, in `(symbol, quantity)`
/// order. A subscription for a symbol with no book yet still emits a line
/// with both sides `NIL`.
pub fn render_vwap_lines<'a>(
    subs: &VwapSubs,
    books: impl Fn(&str) -> Option<&'a OrderBook>,
) -> Vec<String> {
    subs.keys()
        .map(|(symbol, qty)| match books(symbol) {
            Some(book) => format::vwap_line(symbol, &book.vwap(*qty)),
            None => format::vwap_line(symbol, &Default::default()),
        })
        .collect()
}
