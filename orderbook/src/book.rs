//! Per-symbol limit order book.
//!
//! Holds one owning map of `Order` records keyed by id, plus two `PriceLevels`
//! ladders (bids, asks) that index only ids into that map — the "arena +
//! index" pattern spec.md §9 calls out, avoiding any aliasing between the
//! primary store and the price ladders.

use crate::error::{FeedError, Result};
use crate::price_levels::PriceLevels;
use crate::types::{Bbo, FullLevel, Order, OrderId, Side, VolumePrice, Vwap};
use std::collections::HashMap;

/// A single symbol's resting orders, indexed for fast best-price access.
///
/// Price levels are keyed by `f64` via `ordered_float::OrderedFloat`
/// (see `price_levels`). This is a known hazard with NaN and signed zero;
/// this implementation uses direct IEEE-754 equality as spec.md §9 accepts,
/// and does not attempt NaN-proofing or a fixed-point substitute.
pub struct OrderBook {
    symbol: String,
    orders: HashMap<OrderId, Order>,
    bids: PriceLevels,
    asks: PriceLevels,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            orders: HashMap::new(),
            bids: PriceLevels::new(Side::Buy),
            asks: PriceLevels::new(Side::Sell),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn ladder(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Adds a new resting order. Fails if `id` is already present.
    pub fn add(&mut self, id: OrderId, side: Side, quantity: u64, price: f64) -> Result<()> {
        if self.orders.contains_key(&id) {
            return Err(FeedError::DuplicateOrder(id.0));
        }
        self.ladder_mut(side).insert(price, id);
        self.orders.insert(
            id,
            Order {
                id,
                symbol: self.symbol.clone(),
                side,
                quantity,
                price,
            },
        );
        Ok(())
    }

    /// Cancel-and-reinsert on the same side: removes `id` from its current
    /// price bucket, updates quantity and price, reinserts at the new price.
    /// Does not preserve queue position relative to other orders. Fails if
    /// `id` is absent.
    pub fn modify(&mut self, id: OrderId, quantity: u64, price: f64) -> Result<()> {
        let side = {
            let order = self.orders.get(&id).ok_or(FeedError::UnknownOrder(id.0))?;
            order.side
        };
        let old_price = self.orders[&id].price;
        self.ladder_mut(side).remove(old_price, id);
        self.ladder_mut(side).insert(price, id);
        let order = self.orders.get_mut(&id).expect("checked above");
        order.quantity = quantity;
        order.price = price;
        Ok(())
    }

    /// Removes `id` from its price bucket and from the order store. Fails
    /// if `id` is absent.
    pub fn cancel(&mut self, id: OrderId) -> Result<()> {
        let order = self.orders.remove(&id).ok_or(FeedError::UnknownOrder(id.0))?;
        self.ladder_mut(order.side).remove(order.price, id);
        Ok(())
    }

    /// Pure lookup; never fails.
    pub fn get_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    fn volume_at(&self, side: Side, price: f64) -> u64 {
        self.ladder(side)
            .ids_at(price)
            .map(|ids| ids.iter().filter_map(|id| self.orders.get(id)).map(|o| o.quantity).sum())
            .unwrap_or(0)
    }

    /// Best bid and best ask, with aggregate volume at each.
    pub fn bbo(&self) -> Bbo {
        Bbo {
            buy: self.bids.best_price().map(|price| VolumePrice {
                volume: self.volume_at(Side::Buy, price),
                price,
            }),
            sell: self.asks.best_price().map(|price| VolumePrice {
                volume: self.volume_at(Side::Sell, price),
                price,
            }),
        }
    }

    /// Paired, best-first price levels on both sides: while both sides have
    /// levels remaining, yields `(Some, Some)`; then drains whichever side
    /// is longer, yielding `(Some, None)` or `(None, Some)`.
    pub fn price_levels(&self) -> Vec<(Option<VolumePrice>, Option<VolumePrice>)> {
        let bids: Vec<VolumePrice> = self
            .bids
            .iter_best_first()
            .map(|(price, ids)| VolumePrice {
                volume: ids.iter().filter_map(|id| self.orders.get(id)).map(|o| o.quantity).sum(),
                price,
            })
            .collect();
        let asks: Vec<VolumePrice> = self
            .asks
            .iter_best_first()
            .map(|(price, ids)| VolumePrice {
                volume: ids.iter().filter_map(|id| self.orders.get(id)).map(|o| o.quantity).sum(),
                price,
            })
            .collect();
        zip_pairs(bids, asks)
    }

    /// Like `price_levels`, but each entry also reports the order count at
    /// that price, for `PRINT_FULL`.
    pub fn full_depth(&self) -> Vec<(Option<FullLevel>, Option<FullLevel>)> {
        let bids: Vec<FullLevel> = self
            .bids
            .iter_best_first()
            .map(|(price, ids)| FullLevel {
                orders: ids.len(),
                volume: ids.iter().filter_map(|id| self.orders.get(id)).map(|o| o.quantity).sum(),
                price,
            })
            .collect();
        let asks: Vec<FullLevel> = self
            .asks
            .iter_best_first()
            .map(|(price, ids)| FullLevel {
                orders: ids.len(),
                volume: ids.iter().filter_map(|id| self.orders.get(id)).map(|o| o.quantity).sum(),
                price,
            })
            .collect();
        zip_pairs(bids, asks)
    }

    /// Volume-weighted average price of the cheapest (sell side) or
    /// dearest (buy side) `requested_qty` units. A side that never
    /// accumulates `requested_qty` units is reported as invalid (`None`).
    pub fn vwap(&self, requested_qty: u64) -> Vwap {
        Vwap {
            buy: self.vwap_one_side(Side::Buy, requested_qty),
            sell: self.vwap_one_side(Side::Sell, requested_qty),
        }
    }

    fn vwap_one_side(&self, side: Side, requested_qty: u64) -> Option<f64> {
        if requested_qty == 0 {
            return None;
        }
        let mut found_qty: u64 = 0;
        let mut cost: f64 = 0.0;
        'levels: for (price, ids) in self.ladder(side).iter_best_first() {
            for id in ids {
                let Some(order) = self.orders.get(id) else { continue };
                found_qty += order.quantity;
                if found_qty >= requested_qty {
                    let remainder = order.quantity - (found_qty - requested_qty);
                    cost += remainder as f64 * price;
                    break 'levels;
                }
                cost += order.quantity as f64 * price;
            }
        }
        if found_qty >= requested_qty {
            Some(cost / requested_qty as f64)
        } else {
            None
        }
    }
}

/// Zips two best-first level vectors into paired entries: common prefix as
/// `(Some, Some)`, then the longer side's remainder as `(Some, None)` /
/// `(None, Some)`.
fn zip_pairs<T: Clone>(a: Vec<T>, b: Vec<T>) -> Vec<(Option<T>, Option<T>)> {
    let mut out = Vec::with_capacity(a.len().max(b.len()));
    let mut ai = a.into_iter();
    let mut bi = b.into_iter();
    loop {
        match (ai.next(), bi.next()) {
            (None, None) => break,
            pair => out.push(pair),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> OrderBook {
        OrderBook::new("S1")
    }

    #[test]
    fn add_then_get_order() {
        let mut b = book();
        b.add(OrderId(1), Side::Buy, 20, 3.33).unwrap();
        let o = b.get_order(OrderId(1)).unwrap();
        assert_eq!(o.quantity, 20);
        assert_eq!(o.price, 3.33);
        assert_eq!(o.side, Side::Buy);
    }

    #[test]
    fn add_duplicate_fails_and_preserves_original() {
        let mut b = book();
        b.add(OrderId(1), Side::Buy, 20, 3.33).unwrap();
        let err = b.add(OrderId(1), Side::Sell, 30, 4.33).unwrap_err();
        assert_eq!(err, FeedError::DuplicateOrder(1));
        let o = b.get_order(OrderId(1)).unwrap();
        assert_eq!(o.side, Side::Buy);
        assert_eq!(o.quantity, 20);
        assert_eq!(o.price, 3.33);
    }

    #[test]
    fn cancel_unknown_fails() {
        let mut b = book();
        assert_eq!(b.cancel(OrderId(9)).unwrap_err(), FeedError::UnknownOrder(9));
    }

    #[test]
    fn add_then_cancel_round_trips() {
        let mut b = book();
        b.add(OrderId(1), Side::Buy, 20, 3.33).unwrap();
        b.cancel(OrderId(1)).unwrap();
        assert!(b.get_order(OrderId(1)).is_none());
        assert_eq!(b.bbo(), Bbo::default());
        assert!(b.price_levels().is_empty());
    }

    #[test]
    fn modify_is_cancel_then_add_same_side() {
        let mut a = book();
        a.add(OrderId(1), Side::Buy, 20, 10.0).unwrap();
        a.modify(OrderId(1), 5, 11.0).unwrap();

        let mut b = book();
        b.add(OrderId(1), Side::Buy, 20, 10.0).unwrap();
        b.cancel(OrderId(1)).unwrap();
        b.add(OrderId(1), Side::Buy, 5, 11.0).unwrap();

        assert_eq!(a.bbo(), b.bbo());
        assert_eq!(a.price_levels().len(), b.price_levels().len());
    }

    #[test]
    fn bbo_aggregates_volume_at_best_price() {
        let mut b = book();
        b.add(OrderId(1), Side::Buy, 20, 10.0).unwrap();
        b.add(OrderId(2), Side::Buy, 30, 10.0).unwrap();
        b.add(OrderId(3), Side::Buy, 2, 12.0).unwrap();
        let bbo = b.bbo();
        assert_eq!(bbo.buy, Some(VolumePrice { volume: 2, price: 12.0 }));
    }

    #[test]
    fn price_levels_pair_best_first_then_drain_longer_side() {
        let mut b = book();
        b.add(OrderId(1), Side::Buy, 20, 10.0).unwrap();
        b.add(OrderId(2), Side::Buy, 30, 10.0).unwrap();
        b.add(OrderId(3), Side::Buy, 2, 12.0).unwrap();
        b.add(OrderId(4), Side::Buy, 3, 12.0).unwrap();

        let levels = b.price_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].0, Some(VolumePrice { volume: 5, price: 12.0 }));
        assert_eq!(levels[0].1, None);
        assert_eq!(levels[1].0, Some(VolumePrice { volume: 50, price: 10.0 }));
        assert_eq!(levels[1].1, None);
    }

    #[test]
    fn vwap_exact_remainder_accounting() {
        let mut b = book();
        b.add(OrderId(1), Side::Buy, 10, 72.82).unwrap();
        let vwap = b.vwap(5);
        assert_eq!(vwap.buy, Some(72.82));

        b.add(OrderId(2), Side::Buy, 100, 72.81).unwrap();
        let vwap = b.vwap(5);
        assert_eq!(vwap.buy, Some(72.82));
    }

    #[test]
    fn vwap_blends_across_levels_for_the_remainder() {
        let mut b = book();
        b.add(OrderId(1), Side::Sell, 10, 100.0).unwrap();
        b.add(OrderId(2), Side::Sell, 10, 101.0).unwrap();
        // First 10 units @100, next 5 @101: (10*100 + 5*101)/15
        let vwap = b.vwap(15);
        let expected = (10.0 * 100.0 + 5.0 * 101.0) / 15.0;
        assert!((vwap.sell.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn vwap_insufficient_quantity_marks_that_side_invalid() {
        let mut b = book();
        b.add(OrderId(1), Side::Sell, 5, 100.0).unwrap();
        let vwap = b.vwap(10);
        assert_eq!(vwap.sell, None);
        assert_eq!(vwap.buy, None);
    }

    #[test]
    fn vwap_on_empty_book_is_nil_both_sides() {
        let b = book();
        assert_eq!(b.vwap(5), Vwap::default());
    }

    #[test]
    fn full_depth_reports_order_counts() {
        let mut b = book();
        b.add(OrderId(1), Side::Buy, 20, 10.0).unwrap();
        b.add(OrderId(2), Side::Buy, 30, 10.0).unwrap();
        b.add(OrderId(3), Side::Sell, 5, 11.0).unwrap();
        let depth = b.full_depth();
        assert_eq!(depth.len(), 1);
        assert_eq!(
            depth[0].0,
            Some(FullLevel { orders: 2, volume: 50, price: 10.0 })
        );
        assert_eq!(
            depth[0].1,
            Some(FullLevel { orders: 1, volume: 5, price: 11.0 })
        );
    }
}
