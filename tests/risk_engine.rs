use trade_chart_wasm::domain::errors::TerminalError;
use trade_chart_wasm::domain::market_data::Price;
use trade_chart_wasm::domain::trading::{CloseReason, OrderId, RiskEngine, Side};

fn engine_at(price: f64) -> RiskEngine {
    let mut engine = RiskEngine::new(1000.0);
    engine.evaluate(Price::from(price));
    engine
}

#[test]
fn place_requires_a_known_price() {
    let mut engine = RiskEngine::new(1000.0);
    assert_eq!(engine.place(Side::Buy, 1.0), Err(TerminalError::NoPrice));
    assert!((engine.balance() - 1000.0).abs() < f64::EPSILON);
}

#[test]
fn place_rejects_non_positive_quantity() {
    let mut engine = engine_at(50.0);

    assert!(matches!(engine.place(Side::Buy, 0.0), Err(TerminalError::InvalidQuantity(_))));
    assert!(matches!(engine.place(Side::Buy, -2.0), Err(TerminalError::InvalidQuantity(_))));
    assert!(matches!(engine.place(Side::Sell, f64::NAN), Err(TerminalError::InvalidQuantity(_))));
    assert_eq!(engine.open_order_count(), 0);
}

/// Account scenario: balance 1000, buy 2 @ 50, price rises to 60, close
#[test]
fn buy_debit_unrealized_and_close_credit() {
    let mut engine = engine_at(50.0);

    let order = engine.place(Side::Buy, 2.0).unwrap();
    assert!((engine.balance() - 900.0).abs() < 1e-9);

    engine.evaluate(Price::from(60.0));
    assert!((engine.unrealized_pnl() - 20.0).abs() < 1e-9);

    let settlement = engine.close(order.id).unwrap();
    assert!((settlement.realized_pnl - 20.0).abs() < 1e-9);
    assert!((engine.balance() - 1020.0).abs() < 1e-9);
    assert_eq!(engine.open_order_count(), 0);
    assert!(engine.unrealized_pnl().abs() < 1e-9);
}

#[test]
fn entry_and_exit_at_unchanged_price_round_trips_the_balance() {
    let mut engine = engine_at(50.0);

    let order = engine.place(Side::Buy, 3.0).unwrap();
    let settlement = engine.close(order.id).unwrap();

    assert!(settlement.realized_pnl.abs() < 1e-9);
    assert!((engine.balance() - 1000.0).abs() < 1e-9);
}

#[test]
fn sell_credits_entry_and_profits_from_a_drop() {
    let mut engine = engine_at(50.0);

    let order = engine.place(Side::Sell, 1.0).unwrap();
    assert!((engine.balance() - 1050.0).abs() < 1e-9);

    engine.evaluate(Price::from(40.0));
    assert!((engine.unrealized_pnl() - 10.0).abs() < 1e-9);

    let settlement = engine.close(order.id).unwrap();
    assert!((settlement.realized_pnl - 10.0).abs() < 1e-9);
    assert!((engine.balance() - 1110.0).abs() < 1e-9);
}

#[test]
fn closing_twice_never_double_credits() {
    let mut engine = engine_at(50.0);
    let order = engine.place(Side::Buy, 1.0).unwrap();

    engine.close(order.id).unwrap();
    let balance_after_close = engine.balance();

    assert_eq!(engine.close(order.id), Err(TerminalError::OrderNotFound(order.id)));
    assert!((engine.balance() - balance_after_close).abs() < f64::EPSILON);
}

#[test]
fn ledger_operations_report_unknown_ids() {
    let mut engine = engine_at(50.0);
    let ghost = OrderId::from(999u64);

    assert_eq!(engine.close(ghost), Err(TerminalError::OrderNotFound(ghost)));
    assert_eq!(engine.set_stop_loss(ghost, Price::from(40.0)), Err(TerminalError::OrderNotFound(ghost)));
    assert_eq!(engine.set_take_profit(ghost, Price::from(60.0)), Err(TerminalError::OrderNotFound(ghost)));
}

/// Price path 98, 96, 94 against a buy at 100 with stop 95: the stop fires
/// exactly once, on the first tick at or below 95
#[test]
fn stop_loss_fires_once_on_first_breach() {
    let mut engine = engine_at(100.0);
    let order = engine.place(Side::Buy, 1.0).unwrap();
    engine.set_stop_loss(order.id, Price::from(95.0)).unwrap();

    assert!(engine.evaluate(Price::from(98.0)).is_empty());
    assert!(engine.evaluate(Price::from(96.0)).is_empty());

    let closed = engine.evaluate(Price::from(94.0));
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].reason, CloseReason::StopLoss);
    assert!((closed[0].realized_pnl + 6.0).abs() < 1e-9);
    let balance_after_trigger = engine.balance();

    // Same price again: nothing left to close, nothing re-credited
    assert!(engine.evaluate(Price::from(94.0)).is_empty());
    assert!((engine.balance() - balance_after_trigger).abs() < f64::EPSILON);
}

#[test]
fn take_profit_closes_a_buy_into_strength() {
    let mut engine = engine_at(100.0);
    let order = engine.place(Side::Buy, 2.0).unwrap();
    engine.set_take_profit(order.id, Price::from(110.0)).unwrap();

    assert!(engine.evaluate(Price::from(109.99)).is_empty());

    let closed = engine.evaluate(Price::from(110.0));
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].reason, CloseReason::TakeProfit);
    assert!((engine.balance() - 1020.0).abs() < 1e-9);
}

#[test]
fn sell_triggers_mirror_buy_triggers() {
    let mut engine = engine_at(100.0);
    let stopped = engine.place(Side::Sell, 1.0).unwrap();
    let taken = engine.place(Side::Sell, 1.0).unwrap();
    engine.set_stop_loss(stopped.id, Price::from(105.0)).unwrap();
    engine.set_take_profit(taken.id, Price::from(95.0)).unwrap();

    let closed = engine.evaluate(Price::from(106.0));
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].order.id, stopped.id);
    assert_eq!(closed[0].reason, CloseReason::StopLoss);

    let closed = engine.evaluate(Price::from(94.0));
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].order.id, taken.id);
    assert_eq!(closed[0].reason, CloseReason::TakeProfit);
}

/// A gap can satisfy both protective levels in one evaluation; the stop-loss
/// check runs first and wins
#[test]
fn stop_loss_wins_when_both_levels_are_crossed() {
    let mut engine = engine_at(100.0);
    let order = engine.place(Side::Buy, 1.0).unwrap();
    engine.set_stop_loss(order.id, Price::from(100.0)).unwrap();
    engine.set_take_profit(order.id, Price::from(90.0)).unwrap();

    let closed = engine.evaluate(Price::from(95.0));
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].reason, CloseReason::StopLoss);
}

#[test]
fn misplaced_stop_is_accepted_and_fires_next_evaluation() {
    let mut engine = engine_at(100.0);
    let order = engine.place(Side::Buy, 1.0).unwrap();

    // Wrong side of the market: no validation, it simply triggers
    engine.set_stop_loss(order.id, Price::from(105.0)).unwrap();

    let closed = engine.evaluate(Price::from(100.0));
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].reason, CloseReason::StopLoss);
}

#[test]
fn one_trigger_leaves_other_orders_open() {
    let mut engine = engine_at(100.0);
    let stopped = engine.place(Side::Buy, 1.0).unwrap();
    let survivor = engine.place(Side::Buy, 1.0).unwrap();
    engine.set_stop_loss(stopped.id, Price::from(95.0)).unwrap();

    let closed = engine.evaluate(Price::from(94.0));

    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].order.id, stopped.id);
    assert_eq!(engine.open_order_count(), 1);
    assert_eq!(engine.orders()[0].id, survivor.id);
}

#[test]
fn unrealized_pnl_tracks_every_ledger_mutation() {
    let mut engine = engine_at(100.0);

    engine.place(Side::Buy, 1.0).unwrap();
    engine.place(Side::Sell, 2.0).unwrap();
    assert!(engine.unrealized_pnl().abs() < 1e-9);

    engine.evaluate(Price::from(110.0));
    // Buy +10, sell -20
    assert!((engine.unrealized_pnl() + 10.0).abs() < 1e-9);

    let buy_id = engine.orders()[0].id;
    engine.close(buy_id).unwrap();
    assert!((engine.unrealized_pnl() + 20.0).abs() < 1e-9);
}

#[test]
fn protective_levels_overwrite_prior_values() {
    let mut engine = engine_at(100.0);
    let order = engine.place(Side::Buy, 1.0).unwrap();

    engine.set_stop_loss(order.id, Price::from(90.0)).unwrap();
    engine.set_stop_loss(order.id, Price::from(80.0)).unwrap();

    assert!(engine.evaluate(Price::from(85.0)).is_empty());
    let closed = engine.evaluate(Price::from(80.0));
    assert_eq!(closed.len(), 1);
}
