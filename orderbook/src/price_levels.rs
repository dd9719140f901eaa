use crate::types::{OrderId, Side};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};

/// One side of a book: a price-indexed tree of id sets.
///
/// `side` determines which end of the map is "best":
/// - Bids: highest price is best (back of the map)
/// - Asks: lowest price is best (front of the map)
///
/// Within a price bucket ids are kept in a `BTreeSet`, i.e. ascending id
/// order — a deterministic stand-in for arrival order (spec.md §3 does not
/// require strict FIFO, only reproducible iteration).
pub struct PriceLevels {
    side: Side,
    levels: BTreeMap<OrderedFloat<f64>, BTreeSet<OrderId>>,
}

impl PriceLevels {
    /// Creates empty price levels for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Inserts `id` into the bucket at `price`, creating the bucket if absent.
    pub fn insert(&mut self, price: f64, id: OrderId) {
        self.levels
            .entry(OrderedFloat(price))
            .or_default()
            .insert(id);
    }

    /// Removes `id` from the bucket at `price`, dropping the bucket if it
    /// becomes empty. No-op if the id was never there.
    pub fn remove(&mut self, price: f64, id: OrderId) {
        let key = OrderedFloat(price);
        if let Some(ids) = self.levels.get_mut(&key) {
            ids.remove(&id);
            if ids.is_empty() {
                self.levels.remove(&key);
            }
        }
    }

    /// Best price for this side, or `None` if the side has no resting orders.
    pub fn best_price(&self) -> Option<f64> {
        match self.side {
            Side::Buy => self.levels.last_key_value().map(|(p, _)| p.0),
            Side::Sell => self.levels.first_key_value().map(|(p, _)| p.0),
        }
    }

    /// Ids resting at `price`, if any.
    pub fn ids_at(&self, price: f64) -> Option<&BTreeSet<OrderId>> {
        self.levels.get(&OrderedFloat(price))
    }

    /// Number of distinct price levels on this side.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Iterates `(price, ids)` best-first: descending for bids, ascending
    /// for asks. Pull-based, so no level is materialized beyond the one
    /// currently being visited by the caller (spec.md §9 accepts either a
    /// visitor or a pull-based sequence for this traversal).
    pub fn iter_best_first(&self) -> Box<dyn DoubleEndedIterator<Item = (f64, &BTreeSet<OrderId>)> + '_> {
        let mapped = self.levels.iter().map(|(p, ids)| (p.0, ids));
        match self.side {
            Side::Sell => Box::new(mapped),
            Side::Buy => Box::new(mapped.rev()),
        }
    }
}
