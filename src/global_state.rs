use crate::app::OrderView;
use crate::domain::market_data::TimeInterval;
use leptos::*;
use once_cell::sync::OnceCell;

/// Reactive session readouts shared across the UI components.
///
/// The session controller remains the single writer; these signals are a
/// read-only projection refreshed after every handled event.
pub struct Globals {
    pub current_price: RwSignal<Option<f64>>,
    pub balance: RwSignal<f64>,
    pub unrealized_pnl: RwSignal<f64>,
    pub candle_count: RwSignal<usize>,
    pub is_streaming: RwSignal<bool>,
    pub current_interval: RwSignal<TimeInterval>,
    pub order_quantity: RwSignal<f64>,
    pub open_orders: RwSignal<Vec<OrderView>>,
    pub status: RwSignal<String>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        current_price: create_rw_signal(None),
        balance: create_rw_signal(0.0),
        unrealized_pnl: create_rw_signal(0.0),
        candle_count: create_rw_signal(0),
        is_streaming: create_rw_signal(false),
        current_interval: create_rw_signal(TimeInterval::FiveMinutes),
        order_quantity: create_rw_signal(1.0),
        open_orders: create_rw_signal(Vec::new()),
        status: create_rw_signal("Initializing...".to_string()),
    })
}

crate::global_signals! {
    pub current_price => current_price: Option<f64>,
    pub balance => balance: f64,
    pub unrealized_pnl => unrealized_pnl: f64,
    pub candle_count => candle_count: usize,
    pub is_streaming => is_streaming: bool,
    pub current_interval => current_interval: TimeInterval,
    pub order_quantity => order_quantity: f64,
    pub open_orders => open_orders: Vec<OrderView>,
    pub status => status: String,
}
