use crate::domain::market_data::TimeInterval;
use crate::domain::trading::{CloseReason, Order};
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Events related to market data
#[derive(Debug, Clone)]
pub enum MarketDataEvent {
    HistoricalDataLoaded { interval: TimeInterval, candle_count: usize },
    StaleHistoryDiscarded { interval: TimeInterval },
    FeedConnectionLost { reason: String },
}

impl DomainEvent for MarketDataEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MarketDataEvent::HistoricalDataLoaded { .. } => "HistoricalDataLoaded",
            MarketDataEvent::StaleHistoryDiscarded { .. } => "StaleHistoryDiscarded",
            MarketDataEvent::FeedConnectionLost { .. } => "FeedConnectionLost",
        }
    }
}

/// Events related to the order ledger
#[derive(Debug, Clone)]
pub enum TradingEvent {
    OrderOpened { order: Order },
    OrderClosed { order: Order, reason: CloseReason, realized_pnl: f64 },
}

impl DomainEvent for TradingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TradingEvent::OrderOpened { .. } => "OrderOpened",
            TradingEvent::OrderClosed { .. } => "OrderClosed",
        }
    }
}

/// Union the session controller hands to the presentation layer
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Market(MarketDataEvent),
    Trading(TradingEvent),
}

impl SessionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::Market(event) => event.event_type(),
            SessionEvent::Trading(event) => event.event_type(),
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::Market(MarketDataEvent::HistoricalDataLoaded { interval, candle_count }) => {
                write!(f, "Loaded {} candles ({})", candle_count, interval)
            }
            SessionEvent::Market(MarketDataEvent::StaleHistoryDiscarded { interval }) => {
                write!(f, "Discarded stale history for {}", interval)
            }
            SessionEvent::Market(MarketDataEvent::FeedConnectionLost { reason }) => {
                write!(f, "Feed connection lost: {}", reason)
            }
            SessionEvent::Trading(TradingEvent::OrderOpened { order }) => {
                write!(
                    f,
                    "{} {} @ {:.2}",
                    order.side.label(),
                    order.quantity.value(),
                    order.entry_price.value()
                )
            }
            SessionEvent::Trading(TradingEvent::OrderClosed { order, reason, realized_pnl }) => {
                write!(f, "Order {} closed ({}), P/L {:+.2}", order.id, reason, realized_pnl)
            }
        }
    }
}
