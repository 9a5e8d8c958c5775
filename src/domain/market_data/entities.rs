pub use super::value_objects::{Ohlc, Price, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Domain entity - Candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: Timestamp,
    pub ohlc: Ohlc,
}

impl Candle {
    pub fn new(open_time: Timestamp, ohlc: Ohlc) -> Self {
        Self { open_time, ohlc }
    }

    pub fn is_bullish(&self) -> bool {
        self.ohlc.close >= self.ohlc.open
    }
}

/// Domain entity - bounded, time-ordered candle window
///
/// The last candle is the only mutable one; everything before it is settled.
/// Oldest candles are pruned once the window exceeds `max_size`.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    candles: VecDeque<Candle>,
    max_size: usize,
}

impl CandleSeries {
    pub fn new(max_size: usize) -> Self {
        Self { candles: VecDeque::new(), max_size }
    }

    /// Append a candle for a fresh bucket, pruning the oldest past the window
    pub fn append(&mut self, candle: Candle) {
        self.candles.push_back(candle);
        while self.candles.len() > self.max_size {
            self.candles.pop_front();
        }
    }

    pub fn get_candles(&self) -> &VecDeque<Candle> {
        &self.candles
    }

    pub fn to_vec(&self) -> Vec<Candle> {
        self.candles.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.back()
    }

    pub fn latest_mut(&mut self) -> Option<&mut Candle> {
        self.candles.back_mut()
    }

    pub fn count(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn clear(&mut self) {
        self.candles.clear();
    }

    /// Last traded price known to the series
    pub fn latest_close(&self) -> Option<Price> {
        self.candles.back().map(|candle| candle.ohlc.close)
    }

    /// Min/max over all visible highs and lows
    pub fn price_range(&self) -> Option<(Price, Price)> {
        if self.candles.is_empty() {
            return None;
        }

        let mut min_price = self.candles[0].ohlc.low;
        let mut max_price = self.candles[0].ohlc.high;

        for candle in &self.candles {
            if candle.ohlc.low < min_price {
                min_price = candle.ohlc.low;
            }
            if candle.ohlc.high > max_price {
                max_price = candle.ohlc.high;
            }
        }

        Some((min_price, max_price))
    }
}
