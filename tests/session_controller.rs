use trade_chart_wasm::application::{STARTING_BALANCE, SessionController};
use trade_chart_wasm::domain::events::{MarketDataEvent, SessionEvent, TradingEvent};
use trade_chart_wasm::domain::market_data::{
    Candle, Ohlc, Price, Symbol, Tick, TimeInterval, Timestamp,
};
use trade_chart_wasm::domain::trading::{CloseReason, Side};

fn session() -> SessionController {
    SessionController::new(Symbol::from("BTCUSDT"), TimeInterval::FiveMinutes)
}

fn history_candle(i: u64, close: f64) -> Candle {
    Candle::new(
        Timestamp::from_millis(i * 300_000),
        Ohlc::new(Price::from(close), Price::from(close + 1.0), Price::from(close - 1.0), Price::from(close)),
    )
}

fn price_tick(time_ms: u64, price: f64) -> Tick {
    Tick::new(
        Timestamp::from_millis(time_ms),
        Ohlc::new(Price::from(price), Price::from(price), Price::from(price), Price::from(price)),
    )
}

#[test]
fn history_load_seeds_candles_and_latest_price() {
    let mut session = session();

    let applied = session.apply_history(0, (0..10).map(|i| history_candle(i, 100.0 + i as f64)).collect());

    assert!(applied);
    assert_eq!(session.chart().candle_count(), 10);
    // The freshest close becomes the first known market price
    assert!((session.risk().latest_price().unwrap().value() - 109.0).abs() < f64::EPSILON);
    assert!(session.take_dirty());

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        SessionEvent::Market(MarketDataEvent::HistoricalDataLoaded { candle_count: 10, .. })
    )));
}

#[test]
fn stale_history_is_discarded_not_applied() {
    let mut session = session();
    let stale_generation = session.load_generation();

    let generation = session.begin_timeframe_switch(TimeInterval::OneHour);
    assert_eq!(generation, stale_generation + 1);

    let applied = session.apply_history(stale_generation, vec![history_candle(0, 100.0)]);

    assert!(!applied);
    assert_eq!(session.chart().candle_count(), 0);
    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        SessionEvent::Market(MarketDataEvent::StaleHistoryDiscarded { .. })
    )));
}

#[test]
fn timeframe_switch_discards_the_window() {
    let mut session = session();
    session.apply_history(0, (0..5).map(|i| history_candle(i, 100.0)).collect());
    assert_eq!(session.chart().candle_count(), 5);

    session.begin_timeframe_switch(TimeInterval::OneMinute);

    assert_eq!(session.interval(), TimeInterval::OneMinute);
    assert_eq!(session.chart().candle_count(), 0);
}

#[test]
fn tick_marks_the_session_dirty_exactly_once() {
    let mut session = session();
    session.apply_history(0, vec![history_candle(0, 100.0)]);
    session.take_dirty();

    let result = session.on_tick(&price_tick(310_000, 101.0)).unwrap();

    assert!(result.appended);
    assert!(session.take_dirty());
    assert!(!session.take_dirty());
}

#[test]
fn rejected_tick_changes_nothing() {
    let mut session = session();
    session.apply_history(0, vec![history_candle(0, 100.0)]);
    session.take_dirty();

    assert!(session.on_tick(&price_tick(310_000, f64::NAN)).is_err());

    assert_eq!(session.chart().candle_count(), 1);
    assert!(!session.take_dirty());
}

#[test]
fn orders_flow_through_the_controller() {
    let mut session = session();
    session.apply_history(0, vec![history_candle(0, 100.0)]);
    session.drain_events();

    let order = session.place_order(Side::Buy, 2.0).unwrap();
    assert!((session.risk().balance() - (STARTING_BALANCE - 200.0)).abs() < 1e-9);

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        SessionEvent::Trading(TradingEvent::OrderOpened { .. })
    )));

    let settlement = session.close_order(order.id).unwrap();
    assert_eq!(settlement.reason, CloseReason::Manual);
    assert!((session.risk().balance() - STARTING_BALANCE).abs() < 1e-9);
}

/// One tick that extends the chart and trips a stop still costs one repaint
#[test]
fn trigger_and_aggregation_share_a_single_repaint() {
    let mut session = session();
    session.apply_history(0, vec![history_candle(0, 100.0)]);

    let order = session.place_order(Side::Buy, 1.0).unwrap();
    session.set_stop_loss(order.id, Price::from(95.0)).unwrap();
    session.drain_events();
    session.take_dirty();

    session.on_tick(&price_tick(310_000, 94.0)).unwrap();

    assert_eq!(session.risk().open_order_count(), 0);
    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        SessionEvent::Trading(TradingEvent::OrderClosed { reason: CloseReason::StopLoss, .. })
    )));
    assert!(session.take_dirty());
    assert!(!session.take_dirty());
}

#[test]
fn resize_touches_viewport_only() {
    let mut session = session();
    session.apply_history(0, vec![history_candle(0, 100.0)]);
    let balance_before = session.risk().balance();
    session.take_dirty();

    session.resize(1024, 640);

    assert_eq!(session.chart().viewport.width, 1024);
    assert_eq!(session.chart().viewport.height, 640);
    assert_eq!(session.chart().candle_count(), 1);
    assert!((session.risk().balance() - balance_before).abs() < f64::EPSILON);
    assert!(session.take_dirty());
}

#[test]
fn overlay_plan_reflects_session_state() {
    let mut session = session();
    session.apply_history(0, (0..20).map(|i| history_candle(i, 100.0 + i as f64)).collect());
    let order = session.place_order(Side::Buy, 1.0).unwrap();
    session.set_stop_loss(order.id, Price::from(90.0)).unwrap();

    let plan = session.overlay_plan();

    assert!(plan.lines.iter().any(|line| line.dashed));
    assert!(plan.labels.iter().any(|label| label.text.starts_with("SL:")));
    assert!(plan.labels.iter().any(|label| label.text.starts_with("BUY")));
}

#[test]
fn place_before_any_price_is_refused() {
    let mut session = session();
    assert!(session.place_order(Side::Buy, 1.0).is_err());
    assert!(session.drain_events().is_empty());
}
