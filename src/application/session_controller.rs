use crate::domain::chart::{Chart, OverlayPlan, OverlayPlanner};
use crate::domain::errors::TerminalResult;
use crate::domain::events::{MarketDataEvent, SessionEvent, TradingEvent};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    AggregationResult, Candle, Price, Symbol, Tick, TickAggregator, TimeInterval,
};
use crate::domain::trading::{ClosedOrder, Order, OrderId, RiskEngine, Side};
use crate::{log_info, log_warn};

/// Simulated account funding at session start
pub const STARTING_BALANCE: f64 = 1000.0;
/// Candles requested per historical load
pub const HISTORY_LIMIT: usize = 100;
/// Retained candle window
pub const MAX_CANDLES: usize = 1000;

/// Application service - single owner of all session state
///
/// Every mutation (feed tick, user action, resize, history load) flows
/// through one of these methods on the browser event loop; rendering only
/// ever reads. A dirty flag batches each event's mutations into exactly one
/// coordinate-remap-and-repaint cycle.
pub struct SessionController {
    symbol: Symbol,
    chart: Chart,
    aggregator: TickAggregator,
    risk: RiskEngine,
    load_generation: u64,
    dirty: bool,
    events: Vec<SessionEvent>,
}

impl SessionController {
    pub fn new(symbol: Symbol, interval: TimeInterval) -> Self {
        Self {
            symbol,
            chart: Chart::new("main-chart".to_string(), interval, MAX_CANDLES),
            aggregator: TickAggregator::new(interval),
            risk: RiskEngine::new(STARTING_BALANCE),
            load_generation: 0,
            dirty: false,
            events: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn interval(&self) -> TimeInterval {
        self.aggregator.interval()
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn risk(&self) -> &RiskEngine {
        &self.risk
    }

    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    /// Drop candle state and invalidate any in-flight history fetch.
    /// Returns the new load generation the next fetch must carry.
    pub fn begin_timeframe_switch(&mut self, interval: TimeInterval) -> u64 {
        self.chart.reset_for(interval);
        self.aggregator.reset(interval);
        self.load_generation += 1;
        self.dirty = true;

        log_info!(
            LogComponent::Application("Session"),
            "🔄 Switched timeframe to {} (generation {})",
            interval,
            self.load_generation
        );

        self.load_generation
    }

    /// Apply a completed historical load, unless the timeframe moved on
    /// while the fetch was in flight.
    pub fn apply_history(&mut self, generation: u64, candles: Vec<Candle>) -> bool {
        if generation != self.load_generation {
            log_warn!(
                LogComponent::Application("Session"),
                "🗑️ Discarding stale history (generation {} != {})",
                generation,
                self.load_generation
            );
            self.events.push(SessionEvent::Market(MarketDataEvent::StaleHistoryDiscarded {
                interval: self.interval(),
            }));
            return false;
        }

        let count = candles.len();
        self.chart.set_historical_data(candles);

        // The freshest close doubles as the first known market price
        if let Some(price) = self.chart.series.latest_close() {
            self.evaluate_at(price);
        }

        self.events.push(SessionEvent::Market(MarketDataEvent::HistoricalDataLoaded {
            interval: self.interval(),
            candle_count: count,
        }));
        self.dirty = true;
        true
    }

    /// Feed tick: aggregate, run risk triggers, schedule one repaint
    pub fn on_tick(&mut self, tick: &Tick) -> TerminalResult<AggregationResult> {
        let result = self.aggregator.ingest(&mut self.chart.series, tick)?;
        self.evaluate_at(tick.last_price());
        self.chart.update_viewport_price_range();
        self.dirty = true;
        Ok(result)
    }

    pub fn place_order(&mut self, side: Side, quantity: f64) -> TerminalResult<Order> {
        let order = self.risk.place(side, quantity)?;
        self.events.push(SessionEvent::Trading(TradingEvent::OrderOpened { order }));
        self.dirty = true;
        Ok(order)
    }

    pub fn close_order(&mut self, id: OrderId) -> TerminalResult<ClosedOrder> {
        let settlement = self.risk.close(id)?;
        self.push_close_event(settlement);
        self.dirty = true;
        Ok(settlement)
    }

    pub fn set_stop_loss(&mut self, id: OrderId, price: Price) -> TerminalResult<()> {
        self.risk.set_stop_loss(id, price)?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_take_profit(&mut self, id: OrderId, price: Price) -> TerminalResult<()> {
        self.risk.set_take_profit(id, price)?;
        self.dirty = true;
        Ok(())
    }

    /// Viewport resize touches canvas dimensions only, never session state
    pub fn resize(&mut self, width: u32, height: u32) {
        self.chart.resize_viewport(width, height);
        self.dirty = true;
    }

    /// Annotation layer for the current frame
    pub fn overlay_plan(&self) -> OverlayPlan {
        OverlayPlanner::plan(
            &self.chart.viewport,
            &self.chart.series.to_vec(),
            self.risk.orders(),
            self.risk.latest_price(),
        )
    }

    /// Whether a repaint is pending; reading resets the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Session events accumulated since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn evaluate_at(&mut self, price: Price) {
        for settlement in self.risk.evaluate(price) {
            self.push_close_event(settlement);
        }
    }

    fn push_close_event(&mut self, settlement: ClosedOrder) {
        self.events.push(SessionEvent::Trading(TradingEvent::OrderClosed {
            order: settlement.order,
            reason: settlement.reason,
            realized_pnl: settlement.realized_pnl,
        }));
    }
}
