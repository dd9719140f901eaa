/// Side of a resting order: `Buy` rests in the bid ladder, `Sell` in the ask ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub quantity: u64,
    pub price: f64,
}

/// Aggregate volume and price of one price level, as reported by BBO and
/// the price-level/full-depth views.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumePrice {
    pub volume: u64,
    pub price: f64,
}

/// A price level augmented with the number of resting orders, as reported
/// by `PRINT_FULL`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FullLevel {
    pub orders: usize,
    pub volume: u64,
    pub price: f64,
}

/// Best bid and best ask, each optional (absent when that side is empty).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bbo {
    pub buy: Option<VolumePrice>,
    pub sell: Option<VolumePrice>,
}

/// Volume-weighted average price for a requested cumulative quantity,
/// each side optional (absent when the side never accumulates enough
/// quantity to satisfy the request).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vwap {
    pub buy: Option<f64>,
    pub sell: Option<f64>,
}
