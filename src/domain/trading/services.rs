use super::entities::Order;
use super::value_objects::{CloseReason, OrderId, Side};
use crate::domain::errors::{TerminalError, TerminalResult};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Price, Quantity};
use crate::log_info;

/// Settlement record handed back when an order leaves the ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedOrder {
    pub order: Order,
    pub reason: CloseReason,
    pub exit_price: Price,
    pub realized_pnl: f64,
}

/// Domain service - owns the open-order ledger and the simulated balance
///
/// Exclusive owner of order state: placement, protective-level edits and
/// closes all go through here. Every price update re-evaluates stop-loss /
/// take-profit triggers and the aggregate unrealized P/L.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    balance: f64,
    orders: Vec<Order>,
    latest_price: Option<Price>,
    unrealized_pnl: f64,
    next_order_id: u64,
}

impl RiskEngine {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            balance: starting_balance,
            orders: Vec::new(),
            latest_price: None,
            unrealized_pnl: 0.0,
            next_order_id: 1,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn unrealized_pnl(&self) -> f64 {
        self.unrealized_pnl
    }

    pub fn latest_price(&self) -> Option<Price> {
        self.latest_price
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn open_order_count(&self) -> usize {
        self.orders.len()
    }

    /// Open a position at the latest market price
    pub fn place(&mut self, side: Side, quantity: f64) -> TerminalResult<Order> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(TerminalError::InvalidQuantity(quantity));
        }
        let entry_price = self.latest_price.ok_or(TerminalError::NoPrice)?;

        let id = OrderId::from(self.next_order_id);
        self.next_order_id += 1;

        let order = Order::new(id, side, Quantity::from(quantity), entry_price);

        // Buys debit the position value, sells credit it
        match side {
            Side::Buy => self.balance -= order.position_value(),
            Side::Sell => self.balance += order.position_value(),
        }

        self.orders.push(order);
        self.recompute_unrealized();

        log_info!(
            LogComponent::Domain("RiskEngine"),
            "📝 Opened {} {} @ {:.2} (id {})",
            side.label(),
            quantity,
            entry_price.value(),
            id
        );

        Ok(order)
    }

    /// Overwrites any prior stop, even one on the wrong side of the market;
    /// a misplaced stop simply fires on the next evaluation
    pub fn set_stop_loss(&mut self, id: OrderId, price: Price) -> TerminalResult<()> {
        let order = self.find_mut(id)?;
        order.stop_loss = Some(price);
        Ok(())
    }

    pub fn set_take_profit(&mut self, id: OrderId, price: Price) -> TerminalResult<()> {
        let order = self.find_mut(id)?;
        order.take_profit = Some(price);
        Ok(())
    }

    /// Close an order manually at the latest price
    pub fn close(&mut self, id: OrderId) -> TerminalResult<ClosedOrder> {
        self.close_with_reason(id, CloseReason::Manual)
    }

    /// Re-evaluate every open order against a fresh price
    ///
    /// Stop-loss is checked before take-profit, so a gap crossing both levels
    /// settles on the stop. Each order closes at most once per pass and one
    /// order's trigger never aborts evaluation of the rest.
    pub fn evaluate(&mut self, latest: Price) -> Vec<ClosedOrder> {
        self.latest_price = Some(latest);

        let ids: Vec<OrderId> = self.orders.iter().map(|order| order.id).collect();
        let mut closed = Vec::new();

        for id in ids {
            let Some(order) = self.orders.iter().find(|order| order.id == id) else {
                continue;
            };

            let reason = if order.stop_loss_hit(latest) {
                Some(CloseReason::StopLoss)
            } else if order.take_profit_hit(latest) {
                Some(CloseReason::TakeProfit)
            } else {
                None
            };

            if let Some(reason) = reason {
                match self.close_with_reason(id, reason) {
                    Ok(settlement) => closed.push(settlement),
                    Err(_) => continue,
                }
            }
        }

        self.recompute_unrealized();
        closed
    }

    /// Single authoritative removal: the presence check guards against a
    /// trigger and a manual close racing for the same id, so a close can
    /// never credit the balance twice.
    fn close_with_reason(&mut self, id: OrderId, reason: CloseReason) -> TerminalResult<ClosedOrder> {
        let exit_price = self.latest_price.ok_or(TerminalError::NoPrice)?;
        let index = self
            .orders
            .iter()
            .position(|order| order.id == id)
            .ok_or(TerminalError::OrderNotFound(id))?;

        let order = self.orders.remove(index);
        let realized_pnl = order.signed_pnl(exit_price);
        self.balance += order.position_value() + realized_pnl;
        self.recompute_unrealized();

        log_info!(
            LogComponent::Domain("RiskEngine"),
            "💰 Closed order {} ({}) @ {:.2}, realized {:+.2}",
            id,
            reason,
            exit_price.value(),
            realized_pnl
        );

        Ok(ClosedOrder { order, reason, exit_price, realized_pnl })
    }

    fn find_mut(&mut self, id: OrderId) -> TerminalResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(TerminalError::OrderNotFound(id))
    }

    /// Invariant: always the sum of per-order signed P/L at the latest price
    fn recompute_unrealized(&mut self) {
        self.unrealized_pnl = match self.latest_price {
            Some(latest) => self.orders.iter().map(|order| order.signed_pnl(latest)).sum(),
            None => 0.0,
        };
    }
}
