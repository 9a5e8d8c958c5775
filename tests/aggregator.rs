use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use trade_chart_wasm::domain::market_data::{
    CandleSeries, Ohlc, Price, Tick, TickAggregator, TimeInterval, Timestamp,
};

fn tick(time_ms: u64, open: f64, high: f64, low: f64, close: f64) -> Tick {
    Tick::new(
        Timestamp::from_millis(time_ms),
        Ohlc::new(Price::from(open), Price::from(high), Price::from(low), Price::from(close)),
    )
}

fn last_price_tick(time_ms: u64, price: f64) -> Tick {
    tick(time_ms, price, price, price, price)
}

#[test]
fn first_tick_opens_a_bucket() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(100);

    let result = aggregator.ingest(&mut series, &tick(90_000, 10.0, 12.0, 9.0, 11.0)).unwrap();

    assert!(result.appended);
    assert_eq!(series.count(), 1);
    let candle = series.latest().unwrap();
    assert_eq!(candle.open_time.value(), 60_000);
    assert!((candle.ohlc.open.value() - 10.0).abs() < f64::EPSILON);
    // A fresh bucket is seeded at the last traded price
    assert!((candle.ohlc.high.value() - 11.0).abs() < f64::EPSILON);
    assert!((candle.ohlc.low.value() - 11.0).abs() < f64::EPSILON);
    assert!((candle.ohlc.close.value() - 11.0).abs() < f64::EPSILON);
}

#[test]
fn same_bucket_amends_in_place() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(100);

    aggregator.ingest(&mut series, &last_price_tick(0, 10.0)).unwrap();
    let open_before = series.latest().unwrap().ohlc.open;

    let result = aggregator.ingest(&mut series, &tick(30_000, 10.0, 14.0, 8.0, 12.0)).unwrap();

    assert!(!result.appended);
    assert_eq!(series.count(), 1);
    let candle = series.latest().unwrap();
    assert_eq!(candle.ohlc.open, open_before);
    assert!((candle.ohlc.high.value() - 14.0).abs() < f64::EPSILON);
    assert!((candle.ohlc.low.value() - 8.0).abs() < f64::EPSILON);
    assert!((candle.ohlc.close.value() - 12.0).abs() < f64::EPSILON);
}

#[test]
fn new_bucket_appends_exactly_one_candle() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(100);

    aggregator.ingest(&mut series, &last_price_tick(0, 10.0)).unwrap();
    let previous_open_time = series.latest().unwrap().open_time;

    let result = aggregator.ingest(&mut series, &last_price_tick(61_000, 11.0)).unwrap();

    assert!(result.appended);
    assert_eq!(series.count(), 2);
    assert!(series.latest().unwrap().open_time > previous_open_time);
}

/// Feed scenario: 5-minute timeframe, ticks at 100s, 110s and 305s
#[test]
fn five_minute_bucket_scenario() {
    let mut aggregator = TickAggregator::new(TimeInterval::FiveMinutes);
    let mut series = CandleSeries::new(100);

    aggregator.ingest(&mut series, &last_price_tick(100_000, 10.0)).unwrap();
    aggregator.ingest(&mut series, &last_price_tick(110_000, 12.0)).unwrap();

    assert_eq!(series.count(), 1);
    assert_eq!(series.latest().unwrap().open_time.value(), 0);
    assert!((series.latest().unwrap().ohlc.close.value() - 12.0).abs() < f64::EPSILON);

    aggregator.ingest(&mut series, &last_price_tick(305_000, 15.0)).unwrap();

    assert_eq!(series.count(), 2);
    assert_eq!(series.latest().unwrap().open_time.value(), 300_000);
    assert!((series.latest().unwrap().ohlc.close.value() - 15.0).abs() < f64::EPSILON);
}

#[test]
fn rejects_non_finite_prices_without_mutating() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(100);
    aggregator.ingest(&mut series, &last_price_tick(0, 10.0)).unwrap();
    let before = *series.latest().unwrap();

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(aggregator.ingest(&mut series, &last_price_tick(30_000, bad)).is_err());
    }

    assert_eq!(series.count(), 1);
    assert_eq!(*series.latest().unwrap(), before);
}

#[test]
fn rejects_inverted_high_low() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(100);

    assert!(aggregator.ingest(&mut series, &tick(0, 10.0, 8.0, 12.0, 10.0)).is_err());
    assert!(series.is_empty());
}

#[test]
fn rejects_time_running_backwards() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(100);

    aggregator.ingest(&mut series, &last_price_tick(60_000, 10.0)).unwrap();
    let err = aggregator.ingest(&mut series, &last_price_tick(59_000, 11.0));

    assert!(err.is_err());
    assert_eq!(series.count(), 1);
}

#[test]
fn reset_clears_the_monotonicity_cursor() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(100);
    aggregator.ingest(&mut series, &last_price_tick(600_000, 10.0)).unwrap();

    // Timeframe switch: the window is discarded and re-fetched externally
    aggregator.reset(TimeInterval::FiveMinutes);
    series.clear();

    assert_eq!(aggregator.interval(), TimeInterval::FiveMinutes);
    let result = aggregator.ingest(&mut series, &last_price_tick(0, 20.0)).unwrap();
    assert!(result.appended);
    assert_eq!(series.count(), 1);
}

#[test]
fn window_prunes_oldest_candles() {
    let mut aggregator = TickAggregator::new(TimeInterval::OneMinute);
    let mut series = CandleSeries::new(3);

    for i in 0..5u64 {
        aggregator.ingest(&mut series, &last_price_tick(i * 60_000, 10.0 + i as f64)).unwrap();
    }

    assert_eq!(series.count(), 3);
    assert_eq!(series.get_candles().front().unwrap().open_time.value(), 2 * 60_000);
}

#[quickcheck]
fn in_bucket_high_low_are_monotonic(closes: Vec<f64>) -> TestResult {
    if closes.iter().any(|price| !price.is_finite()) {
        return TestResult::discard();
    }

    let mut aggregator = TickAggregator::new(TimeInterval::OneHour);
    let mut series = CandleSeries::new(10);
    aggregator.ingest(&mut series, &last_price_tick(0, 100.0)).unwrap();

    let mut previous_high = series.latest().unwrap().ohlc.high.value();
    let mut previous_low = series.latest().unwrap().ohlc.low.value();

    // All ticks stay inside the first hour bucket
    for (i, close) in closes.iter().take(50).enumerate() {
        aggregator.ingest(&mut series, &last_price_tick(1 + i as u64, *close)).unwrap();

        let candle = series.latest().unwrap();
        if series.count() != 1
            || candle.ohlc.high.value() < previous_high
            || candle.ohlc.low.value() > previous_low
        {
            return TestResult::failed();
        }
        previous_high = candle.ohlc.high.value();
        previous_low = candle.ohlc.low.value();
    }

    TestResult::passed()
}
