use super::value_objects::Viewport;
use crate::domain::market_data::{Candle, CandleSeries, TimeInterval};

/// Domain entity - the chart for the active timeframe
///
/// Holds exactly one candle window; switching timeframes throws the window
/// away and waits for a fresh historical load.
#[derive(Debug, Clone)]
pub struct Chart {
    pub id: String,
    pub interval: TimeInterval,
    pub series: CandleSeries,
    pub viewport: Viewport,
}

impl Chart {
    pub fn new(id: String, interval: TimeInterval, max_candles: usize) -> Self {
        Self { id, interval, series: CandleSeries::new(max_candles), viewport: Viewport::default() }
    }

    /// Replace the window with freshly fetched history
    pub fn set_historical_data(&mut self, mut candles: Vec<Candle>) {
        candles.sort_by(|a, b| a.open_time.cmp(&b.open_time));
        candles.dedup_by_key(|candle| candle.open_time);

        self.series.clear();
        for candle in candles {
            self.series.append(candle);
        }
        self.update_viewport_price_range();
    }

    /// Drop all candle state for a timeframe switch
    pub fn reset_for(&mut self, interval: TimeInterval) {
        self.interval = interval;
        self.series.clear();
    }

    pub fn candle_count(&self) -> usize {
        self.series.count()
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }

    /// Re-derive the visible price band from the window's highs and lows
    pub fn update_viewport_price_range(&mut self) {
        if let Some((min_price, max_price)) = self.series.price_range() {
            self.viewport.set_price_range(min_price.value(), max_price.value());
        }
    }

    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport.width = width;
            self.viewport.height = height;
        }
    }
}
