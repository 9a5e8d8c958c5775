use super::value_objects::{OrderId, Side};
use crate::domain::market_data::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Domain entity - a simulated position in the ledger
///
/// Created atomically with the balance transfer at entry; mutated only
/// through stop-loss/take-profit assignment; removed on close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub quantity: Quantity,
    pub entry_price: Price,
    pub stop_loss: Option<Price>,
    pub take_profit: Option<Price>,
}

impl Order {
    pub fn new(id: OrderId, side: Side, quantity: Quantity, entry_price: Price) -> Self {
        Self { id, side, quantity, entry_price, stop_loss: None, take_profit: None }
    }

    /// Notional transferred at entry
    pub fn position_value(&self) -> f64 {
        self.entry_price.value() * self.quantity.value()
    }

    /// Signed paper P/L against the given price
    pub fn signed_pnl(&self, latest: Price) -> f64 {
        match self.side {
            Side::Buy => (latest.value() - self.entry_price.value()) * self.quantity.value(),
            Side::Sell => (self.entry_price.value() - latest.value()) * self.quantity.value(),
        }
    }

    /// Whether the protective stop would fire at this price
    pub fn stop_loss_hit(&self, latest: Price) -> bool {
        match (self.stop_loss, self.side) {
            (Some(stop), Side::Buy) => latest <= stop,
            (Some(stop), Side::Sell) => latest >= stop,
            (None, _) => false,
        }
    }

    /// Whether the take-profit would fire at this price
    pub fn take_profit_hit(&self, latest: Price) -> bool {
        match (self.take_profit, self.side) {
            (Some(target), Side::Buy) => latest >= target,
            (Some(target), Side::Sell) => latest <= target,
            (None, _) => false,
        }
    }
}
