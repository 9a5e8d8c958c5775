use crate::domain::errors::{TerminalError, TerminalResult};
use crate::domain::market_data::{Candle, CandleSeries, Ohlc, Tick, TimeInterval, Timestamp};

/// Result of folding one tick into the candle window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationResult {
    /// Whether the tick opened a new bucket (vs. amending the last candle)
    pub appended: bool,
}

/// Domain service - folds raw ticks into time-bucketed candles
///
/// Bucketing is `floor(time / T) * T` for the active timeframe. The aggregator
/// only keeps a monotonicity cursor; the candles themselves live in the
/// series owned by the chart. Switching timeframes resets the cursor and the
/// caller discards the series.
#[derive(Debug, Clone)]
pub struct TickAggregator {
    interval: TimeInterval,
    last_tick_time: Option<Timestamp>,
}

impl TickAggregator {
    pub fn new(interval: TimeInterval) -> Self {
        Self { interval, last_tick_time: None }
    }

    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    /// Reset for a new timeframe; the candle window is re-fetched externally
    pub fn reset(&mut self, interval: TimeInterval) {
        self.interval = interval;
        self.last_tick_time = None;
    }

    /// Fold one tick into the series
    ///
    /// Malformed ticks (non-finite prices, time running backwards) are
    /// rejected without touching the series or the cursor.
    pub fn ingest(&mut self, series: &mut CandleSeries, tick: &Tick) -> TerminalResult<AggregationResult> {
        if !tick.ohlc.is_valid() {
            return Err(TerminalError::Validation(format!(
                "malformed tick at {}: O:{} H:{} L:{} C:{}",
                tick.time.value(),
                tick.ohlc.open.value(),
                tick.ohlc.high.value(),
                tick.ohlc.low.value(),
                tick.ohlc.close.value()
            )));
        }

        if let Some(last_time) = self.last_tick_time {
            if tick.time < last_time {
                return Err(TerminalError::Validation(format!(
                    "non-monotonic tick time {} after {}",
                    tick.time.value(),
                    last_time.value()
                )));
            }
        }

        let bucket = self.interval.bucket_start(tick.time);

        if let Some(last) = series.latest_mut() {
            if last.open_time == bucket {
                // Amend the current bucket in place; open never changes
                if tick.ohlc.high > last.ohlc.high {
                    last.ohlc.high = tick.ohlc.high;
                }
                if tick.ohlc.low < last.ohlc.low {
                    last.ohlc.low = tick.ohlc.low;
                }
                last.ohlc.close = tick.ohlc.close;
                self.last_tick_time = Some(tick.time);
                return Ok(AggregationResult { appended: false });
            }

            if bucket < last.open_time {
                return Err(TerminalError::Validation(format!(
                    "tick bucket {} precedes current candle {}",
                    bucket.value(),
                    last.open_time.value()
                )));
            }
        }

        // Fresh bucket: seeded at the last traded price, open from the tick
        let close = tick.ohlc.close;
        series.append(Candle::new(bucket, Ohlc::new(tick.ohlc.open, close, close, close)));
        self.last_tick_time = Some(tick.time);

        Ok(AggregationResult { appended: true })
    }
}
