use trade_chart_wasm::domain::chart::services::OverlayLineKind;
use trade_chart_wasm::domain::chart::{OverlayPlanner, PRICE_GRID_DIVISIONS, Viewport};
use trade_chart_wasm::domain::market_data::{Candle, Ohlc, Price, Quantity, Timestamp};
use trade_chart_wasm::domain::trading::{Order, OrderId, Side};

fn candle(i: u64, close: f64) -> Candle {
    Candle::new(
        Timestamp::from_millis(i * 60_000),
        Ohlc::new(Price::from(close), Price::from(close + 1.0), Price::from(close - 1.0), Price::from(close)),
    )
}

fn viewport() -> Viewport {
    let mut viewport = Viewport::new(800, 500);
    viewport.set_price_range(100.0, 200.0);
    viewport
}

#[test]
fn grid_divides_the_price_band_evenly() {
    let plan = OverlayPlanner::plan(&viewport(), &[], &[], None);

    let grid: Vec<_> =
        plan.lines.iter().filter(|line| line.kind == OverlayLineKind::Grid).collect();
    assert_eq!(grid.len(), PRICE_GRID_DIVISIONS + 1);

    // Band edges land on the canvas edges
    assert!((grid.first().unwrap().y - 500.0).abs() < 1e-9);
    assert!((grid.last().unwrap().y - 0.0).abs() < 1e-9);
    assert!(grid.iter().all(|line| !line.dashed));

    // One price label per grid line
    assert!(plan.labels.iter().any(|label| label.text == "100.00"));
    assert!(plan.labels.iter().any(|label| label.text == "200.00"));
}

#[test]
fn live_price_line_tracks_the_latest_price() {
    let plan = OverlayPlanner::plan(&viewport(), &[], &[], Some(Price::from(150.0)));

    let line = plan
        .lines
        .iter()
        .find(|line| line.kind == OverlayLineKind::CurrentPrice)
        .expect("current price line");
    assert!((line.y - 250.0).abs() < 1e-9);
    assert!(plan.labels.iter().any(|label| label.text == "150.00"));
}

#[test]
fn no_price_line_before_the_first_tick() {
    let plan = OverlayPlanner::plan(&viewport(), &[], &[], None);
    assert!(plan.lines.iter().all(|line| line.kind != OverlayLineKind::CurrentPrice));
}

#[test]
fn protective_levels_are_dashed_and_labelled() {
    let mut order = Order::new(OrderId::from(1u64), Side::Buy, Quantity::from(2.0), Price::from(150.0));
    order.stop_loss = Some(Price::from(120.0));
    order.take_profit = Some(Price::from(180.0));

    let plan = OverlayPlanner::plan(&viewport(), &[], &[order], Some(Price::from(150.0)));

    let stop = plan.lines.iter().find(|l| l.kind == OverlayLineKind::StopLoss).unwrap();
    let target = plan.lines.iter().find(|l| l.kind == OverlayLineKind::TakeProfit).unwrap();
    assert!(stop.dashed);
    assert!(target.dashed);
    assert!(plan.labels.iter().any(|label| label.text == "SL: 120.00"));
    assert!(plan.labels.iter().any(|label| label.text == "TP: 180.00"));
}

#[test]
fn entry_lines_carry_side_and_quantity() {
    let buy = Order::new(OrderId::from(1u64), Side::Buy, Quantity::from(2.0), Price::from(150.0));
    let sell = Order::new(OrderId::from(2u64), Side::Sell, Quantity::from(1.0), Price::from(160.0));

    let plan = OverlayPlanner::plan(&viewport(), &[], &[buy, sell], Some(Price::from(150.0)));

    assert!(plan.lines.iter().any(|l| l.kind == OverlayLineKind::Entry(Side::Buy) && !l.dashed));
    assert!(plan.lines.iter().any(|l| l.kind == OverlayLineKind::Entry(Side::Sell)));
    assert!(plan.labels.iter().any(|label| label.text == "BUY 2 @ 150.00"));
    assert!(plan.labels.iter().any(|label| label.text == "SELL 1 @ 160.00"));
}

#[test]
fn one_time_label_per_stride() {
    let candles: Vec<Candle> = (0..25).map(|i| candle(i, 150.0)).collect();

    let plan = OverlayPlanner::plan(&viewport(), &candles, &[], None);

    // Candles 0, 10 and 20 get labels, formatted as UTC clock time
    let time_labels: Vec<_> = plan
        .labels
        .iter()
        .filter(|label| label.text.len() == 5 && label.text.contains(':'))
        .collect();
    assert_eq!(time_labels.len(), 3);
    assert_eq!(time_labels[0].text, "00:00");
    assert_eq!(time_labels[1].text, "00:10");
    assert_eq!(time_labels[2].text, "00:20");
}

#[test]
fn orders_without_levels_add_no_dashed_lines() {
    let order = Order::new(OrderId::from(1u64), Side::Buy, Quantity::from(1.0), Price::from(150.0));

    let plan = OverlayPlanner::plan(&viewport(), &[], &[order], Some(Price::from(150.0)));

    assert!(plan.lines.iter().all(|line| !line.dashed));
}
