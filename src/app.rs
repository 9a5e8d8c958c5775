use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::application::{HISTORY_LIMIT, SessionController};
use crate::domain::{
    logging::LogComponent,
    market_data::{Price, Symbol, TimeInterval},
    trading::{Order, OrderId, Side},
};
use crate::global_state::{
    balance, candle_count, current_interval, current_price, is_streaming, open_orders,
    order_quantity, status,
};
use crate::infrastructure::{
    http::BinanceHttpClient,
    rendering::{CanvasOverlayRenderer, WebGpuRenderer, set_global_renderer, with_global_renderer},
    websocket::BinanceWebSocketClient,
};
use crate::{log_error, log_info, log_warn};
use strum::IntoEnumIterator;

const DEFAULT_SYMBOL: &str = "BTCUSDT";
const DEFAULT_INTERVAL: TimeInterval = TimeInterval::FiveMinutes;

// Session state lives on the browser event loop thread; every handler funnels
// through these cells, so there is exactly one writer and no locking.
thread_local! {
    static SESSION: RefCell<Option<SessionController>> = const { RefCell::new(None) };
    static OVERLAY: RefCell<Option<CanvasOverlayRenderer>> = const { RefCell::new(None) };
    static FEED_ABORT: RefCell<Option<AbortHandle>> = const { RefCell::new(None) };
}

/// Run a closure against the live session, if one has been mounted
pub fn with_session<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut SessionController) -> R,
{
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Row projection of an open order for the portfolio table
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: OrderId,
    pub side: Side,
    pub quantity: f64,
    pub entry_price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub pnl: f64,
}

impl OrderView {
    fn from_order(order: &Order, latest: Option<Price>) -> Self {
        Self {
            id: order.id,
            side: order.side,
            quantity: order.quantity.value(),
            entry_price: order.entry_price.value(),
            stop_loss: order.stop_loss.map(|price| price.value()),
            take_profit: order.take_profit.map(|price| price.value()),
            pnl: latest.map(|price| order.signed_pnl(price)).unwrap_or(0.0),
        }
    }
}

struct UiSnapshot {
    events: Vec<crate::domain::events::SessionEvent>,
    balance: f64,
    unrealized_pnl: f64,
    latest_price: Option<f64>,
    candle_count: usize,
    orders: Vec<OrderView>,
}

/// Push session state into the UI signals and repaint if anything changed.
///
/// Called exactly once at the tail of every event handler, so a tick that
/// both amends a candle and trips a stop still costs a single repaint. The
/// repaint runs while the session is borrowed; the reactive signal writes
/// happen afterwards, outside the borrow.
fn refresh_ui() {
    let Some(snapshot) = with_session(|session| {
        if session.take_dirty() {
            if let Some(Err(e)) = with_global_renderer(|renderer| renderer.render(session.chart())) {
                log_error!(LogComponent::Presentation("App"), "❌ Candle layer repaint failed: {}", e);
            }

            let plan = session.overlay_plan();
            OVERLAY.with(|cell| {
                if let Some(overlay) = cell.borrow().as_ref() {
                    if let Err(e) = overlay.paint(&plan) {
                        log_warn!(
                            LogComponent::Presentation("App"),
                            "⚠️ Overlay repaint failed: {}",
                            e
                        );
                    }
                }
            });
        }

        let latest = session.risk().latest_price();
        UiSnapshot {
            events: session.drain_events(),
            balance: session.risk().balance(),
            unrealized_pnl: session.risk().unrealized_pnl(),
            latest_price: latest.map(|price| price.value()),
            candle_count: session.chart().candle_count(),
            orders: session
                .risk()
                .orders()
                .iter()
                .map(|order| OrderView::from_order(order, latest))
                .collect(),
        }
    }) else {
        return;
    };

    for event in &snapshot.events {
        log_info!(LogComponent::Presentation("App"), "📣 [{}] {}", event.event_type(), event);
        status().set(event.to_string());
    }

    balance().set(snapshot.balance);
    crate::global_state::unrealized_pnl().set(snapshot.unrealized_pnl);
    current_price().set(snapshot.latest_price);
    candle_count().set(snapshot.candle_count);
    open_orders().set(snapshot.orders);
}

/// Chart canvas dimensions derived from the window, leaving room for the
/// header and the order panel below
fn chart_dimensions() -> (u32, u32) {
    let window = web_sys::window();
    let width = window
        .as_ref()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(960.0);
    let height = window
        .as_ref()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(900.0);

    (((width - 60.0).max(400.0)) as u32, ((height * 0.5).max(300.0)) as u32)
}

fn handle_resize() {
    let (width, height) = chart_dimensions();
    let _ = with_session(|session| session.resize(width, height));
    if let Some(Err(e)) = with_global_renderer(|renderer| renderer.resize(width, height)) {
        log_warn!(LogComponent::Presentation("App"), "⚠️ Resize failed: {}", e);
    }
    OVERLAY.with(|cell| {
        if let Some(overlay) = cell.borrow_mut().as_mut() {
            overlay.set_dimensions(width, height);
        }
    });
    refresh_ui();
}

/// Kick off the historical load for a given generation; a stale result is
/// discarded by the session controller, never applied
fn load_history(generation: u64, interval: TimeInterval) {
    spawn_local(async move {
        let client = BinanceHttpClient::new();
        match client.fetch_history(&Symbol::from(DEFAULT_SYMBOL), interval, HISTORY_LIMIT).await {
            Ok(candles) => {
                let _ = with_session(|session| session.apply_history(generation, candles));
                refresh_ui();
            }
            Err(e) => {
                log_error!(LogComponent::Presentation("App"), "❌ History load failed: {}", e);
                status().set(e.to_string());
            }
        }
    });
}

/// (Re)subscribe the live feed, aborting any previous subscription first
fn spawn_feed(interval: TimeInterval) {
    FEED_ABORT.with(|cell| {
        if let Some(handle) = cell.borrow_mut().take() {
            handle.abort();
        }
    });

    let (handle, registration) = AbortHandle::new_pair();
    FEED_ABORT.with(|cell| *cell.borrow_mut() = Some(handle));
    is_streaming().set(true);

    spawn_local(async move {
        let mut client = BinanceWebSocketClient::new(Symbol::from(DEFAULT_SYMBOL), interval);
        let stream = client.run_stream(|tick| {
            if let Some(Err(e)) = with_session(|session| session.on_tick(&tick)) {
                log_warn!(LogComponent::Presentation("App"), "⚠️ Tick rejected: {}", e);
            }
            refresh_ui();
        });

        match Abortable::new(stream, registration).await {
            Ok(Err(e)) => {
                // The session keeps showing the last known state
                is_streaming().set(false);
                status().set(e.to_string());
                log_error!(LogComponent::Presentation("App"), "❌ Feed stream failed: {}", e);
            }
            Ok(Ok(())) => {}
            Err(_aborted) => {
                // Replacement subscription owns the streaming flag
                log_info!(LogComponent::Presentation("App"), "🛑 Feed subscription aborted");
            }
        }
    });
}

fn change_timeframe(interval: TimeInterval) {
    current_interval().set(interval);
    if let Some(generation) = with_session(|session| session.begin_timeframe_switch(interval)) {
        refresh_ui();
        load_history(generation, interval);
        spawn_feed(interval);
    }
}

fn place_order(side: Side) {
    let quantity = order_quantity().get_untracked();
    if let Some(Err(e)) = with_session(|session| session.place_order(side, quantity)) {
        status().set(e.to_string());
    }
    refresh_ui();
}

fn close_order(id: OrderId) {
    if let Some(Err(e)) = with_session(|session| session.close_order(id)) {
        status().set(e.to_string());
    }
    refresh_ui();
}

/// Root component of the workstation
#[component]
pub fn App() -> impl IntoView {
    let _resize_listener = window_event_listener(ev::resize, move |_| handle_resize());

    view! {
        <style>
            {r#"
            .trade-terminal {
                font-family: 'Montserrat', -apple-system, BlinkMacSystemFont, sans-serif;
                background: #1a1a2e;
                min-height: 100vh;
                padding: 14px;
                color: #e6e6fa;
            }

            .header {
                background: #16213e;
                padding: 12px 16px;
                border-radius: 8px;
                border-bottom: 1px solid #2a2a4a;
                margin-bottom: 12px;
                display: flex;
                justify-content: space-between;
                align-items: center;
                gap: 16px;
                flex-wrap: wrap;
            }

            .header-group {
                display: flex;
                align-items: center;
                gap: 10px;
            }

            .header label {
                color: #c0c0c0;
                font-size: 13px;
            }

            .header select, .header input {
                padding: 6px 10px;
                border-radius: 4px;
                border: 1px solid #3f3f6d;
                background: #2c2c54;
                color: #e6e6fa;
                font-size: 13px;
                outline: none;
            }

            .header input { width: 70px; }

            .stat {
                text-align: center;
            }

            .stat-value {
                font-size: 18px;
                font-weight: 700;
                font-family: 'Courier New', monospace;
            }

            .stat-label {
                font-size: 11px;
                color: #8a8aa3;
            }

            .positive { color: #26a69a; }
            .negative { color: #ef5350; }

            .buy-btn, .sell-btn, .close-btn, .edit-btn {
                padding: 7px 16px;
                border: none;
                border-radius: 4px;
                cursor: pointer;
                font-size: 13px;
                color: white;
            }

            .buy-btn { background: #26a69a; }
            .sell-btn { background: #ef5350; }
            .close-btn, .edit-btn {
                background: #2c2c54;
                border: 1px solid #2a2a4a;
                padding: 5px 10px;
            }

            .chart-container {
                position: relative;
                margin-bottom: 12px;
            }

            .chart-container canvas {
                position: absolute;
                top: 0;
                left: 0;
                border-radius: 8px;
            }

            #chart-canvas { z-index: 1; }
            #overlay-canvas { z-index: 2; }

            .status {
                color: #8a8aa3;
                font-size: 12px;
                padding: 4px 2px;
            }

            .order-panel {
                background: #16213e;
                border: 1px solid #2a2a4a;
                border-radius: 8px;
                padding: 16px;
            }

            .order-panel h3 {
                margin: 0 0 12px 0;
                color: #d4af37;
                font-weight: 500;
                border-bottom: 1px solid #2a2a4a;
                padding-bottom: 8px;
            }

            .order-panel table {
                width: 100%;
                border-collapse: collapse;
            }

            .order-panel th {
                text-align: left;
                padding: 8px;
                color: #c0c0c0;
                font-weight: 400;
                font-size: 12px;
                letter-spacing: 1px;
                border-bottom: 1px solid #2a2a4a;
            }

            .order-panel td {
                padding: 8px;
                font-size: 13px;
                border-bottom: 1px solid #2a2a4a;
            }

            .order-panel input {
                width: 90px;
                padding: 5px 8px;
                background: #2c2c54;
                color: #e6e6fa;
                border: 1px solid #3f3f6d;
                border-radius: 4px;
                font-size: 12px;
            }

            .empty-orders {
                color: #8a8aa3;
                text-align: center;
                padding: 30px 16px;
                border: 1px dashed #2a2a4a;
                border-radius: 6px;
                margin-top: 12px;
                font-size: 13px;
            }
            "#}
        </style>
        <div class="trade-terminal">
            <Header />
            <ChartContainer />
            <OrderPanel />
        </div>
    }
}

/// Timeframe selector, quantity input, trade buttons and account readouts
#[component]
fn Header() -> impl IntoView {
    view! {
        <div class="header">
            <div class="header-group">
                <label>"Time Frame:"</label>
                <select on:change=move |ev| {
                    if let Ok(interval) = event_target_value(&ev).parse::<TimeInterval>() {
                        change_timeframe(interval);
                    }
                }>
                    {TimeInterval::iter()
                        .map(|tf| {
                            view! {
                                <option
                                    value=tf.to_string()
                                    selected={move || current_interval().get() == tf}
                                >
                                    {tf.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>

                <label>"Qty:"</label>
                <input
                    type="number"
                    min="1"
                    prop:value=move || order_quantity().get()
                    on:input=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                            order_quantity().set(value);
                        }
                    }
                />

                <button class="buy-btn" on:click=move |_| place_order(Side::Buy)>"Buy"</button>
                <button class="sell-btn" on:click=move |_| place_order(Side::Sell)>"Sell"</button>
            </div>

            <div class="header-group">
                <div class="stat">
                    <div class="stat-value">
                        {move || {
                            current_price()
                                .get()
                                .map(|price| format!("${:.2}", price))
                                .unwrap_or_else(|| "—".to_string())
                        }}
                    </div>
                    <div class="stat-label">"BTC/USDT"</div>
                </div>
                <div class="stat">
                    <div class="stat-value">{move || format!("${:.2}", balance().get())}</div>
                    <div class="stat-label">"Balance"</div>
                </div>
                <div class="stat">
                    <div
                        class="stat-value"
                        class:positive={move || crate::global_state::unrealized_pnl().get() >= 0.0}
                        class:negative={move || crate::global_state::unrealized_pnl().get() < 0.0}
                    >
                        {move || format!("{:+.2}", crate::global_state::unrealized_pnl().get())}
                    </div>
                    <div class="stat-label">"Unrealized P/L"</div>
                </div>
                <div class="stat">
                    <div class="stat-value">{move || candle_count().get()}</div>
                    <div class="stat-label">"Candles"</div>
                </div>
                <div class="stat">
                    <div class="stat-value">
                        {move || if is_streaming().get() { "🟢 LIVE" } else { "🔴 OFF" }}
                    </div>
                    <div class="stat-label">"Feed"</div>
                </div>
            </div>
        </div>
    }
}

/// WebGPU candle canvas plus the 2D annotation canvas stacked above it
#[component]
fn ChartContainer() -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let (width, height) = chart_dimensions();

    create_effect(move |_| {
        if canvas_ref.get().is_some() {
            spawn_local(async move {
                let (width, height) = chart_dimensions();

                SESSION.with(|cell| {
                    *cell.borrow_mut() = Some(SessionController::new(
                        Symbol::from(DEFAULT_SYMBOL),
                        DEFAULT_INTERVAL,
                    ));
                });
                let _ = with_session(|session| session.resize(width, height));

                status().set("🚀 Initializing WebGPU renderer...".to_string());
                match init_renderers(width, height).await {
                    Ok(()) => {
                        status().set("✅ WebGPU renderer ready".to_string());
                        let generation =
                            with_session(|session| session.load_generation()).unwrap_or(0);
                        load_history(generation, DEFAULT_INTERVAL);
                        spawn_feed(DEFAULT_INTERVAL);
                    }
                    Err(e) => {
                        status().set(format!("❌ WebGPU failed: {}", e));
                    }
                }
            });
        }
    });

    view! {
        <div class="chart-container" style=format!("height: {}px", height)>
            <canvas id="chart-canvas" node_ref=canvas_ref width=width height=height />
            <canvas id="overlay-canvas" width=width height=height />
        </div>
        <div class="status">{move || status().get()}</div>
    }
}

async fn init_renderers(width: u32, height: u32) -> crate::domain::errors::TerminalResult<()> {
    let renderer = WebGpuRenderer::new("chart-canvas", width, height).await?;
    set_global_renderer(Rc::new(RefCell::new(renderer)));

    let overlay = CanvasOverlayRenderer::new("overlay-canvas".to_string(), width, height);
    let _ = overlay.paint_loading_message();
    OVERLAY.with(|cell| *cell.borrow_mut() = Some(overlay));

    Ok(())
}

/// Open-order table with inline stop-loss / take-profit editing
#[component]
fn OrderPanel() -> impl IntoView {
    let (selected_order, set_selected_order) = create_signal::<Option<OrderId>>(None);
    let (stop_loss_input, set_stop_loss_input) = create_signal(String::new());
    let (take_profit_input, set_take_profit_input) = create_signal(String::new());

    let apply_stop_loss = move |id: OrderId| {
        if let Ok(value) = stop_loss_input.get_untracked().trim().parse::<f64>() {
            if let Some(Err(e)) = with_session(|session| session.set_stop_loss(id, Price::from(value))) {
                status().set(e.to_string());
            }
            refresh_ui();
        }
        set_stop_loss_input.set(String::new());
        set_selected_order.set(None);
    };

    let apply_take_profit = move |id: OrderId| {
        if let Ok(value) = take_profit_input.get_untracked().trim().parse::<f64>() {
            if let Some(Err(e)) = with_session(|session| session.set_take_profit(id, Price::from(value))) {
                status().set(e.to_string());
            }
            refresh_ui();
        }
        set_take_profit_input.set(String::new());
        set_selected_order.set(None);
    };

    view! {
        <div class="order-panel">
            <h3>"Portfolio Management"</h3>
            <table>
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"TYPE"</th>
                        <th>"QTY"</th>
                        <th>"PRICE"</th>
                        <th>"STOP LOSS"</th>
                        <th>"TAKE PROFIT"</th>
                        <th>"P/L"</th>
                        <th>"ACTIONS"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        open_orders()
                            .get()
                            .into_iter()
                            .map(|order| {
                                let id = order.id;
                                let side = order.side;
                                let stop_loss = order.stop_loss;
                                let take_profit = order.take_profit;
                                let editing = move || selected_order.get() == Some(id);
                                view! {
                                    <tr>
                                        <td>{id.to_string()}</td>
                                        <td
                                            class:positive={side == Side::Buy}
                                            class:negative={side == Side::Sell}
                                        >
                                            {side.label()}
                                        </td>
                                        <td>{order.quantity}</td>
                                        <td>{format!("${:.2}", order.entry_price)}</td>
                                        <td>
                                            {move || {
                                                if editing() {
                                                    view! {
                                                        <span>
                                                            <input
                                                                type="text"
                                                                placeholder="Set SL price"
                                                                prop:value=stop_loss_input
                                                                on:input=move |ev| {
                                                                    set_stop_loss_input.set(event_target_value(&ev));
                                                                }
                                                            />
                                                            <button
                                                                class="edit-btn"
                                                                on:click=move |_| apply_stop_loss(id)
                                                            >
                                                                "Set"
                                                            </button>
                                                        </span>
                                                    }
                                                        .into_view()
                                                } else {
                                                    view! {
                                                        <span>
                                                            {stop_loss
                                                                .map(|sl| format!("${:.2}", sl))
                                                                .unwrap_or_else(|| "—".to_string())}
                                                        </span>
                                                    }
                                                        .into_view()
                                                }
                                            }}
                                        </td>
                                        <td>
                                            {move || {
                                                if editing() {
                                                    view! {
                                                        <span>
                                                            <input
                                                                type="text"
                                                                placeholder="Set TP price"
                                                                prop:value=take_profit_input
                                                                on:input=move |ev| {
                                                                    set_take_profit_input.set(event_target_value(&ev));
                                                                }
                                                            />
                                                            <button
                                                                class="edit-btn"
                                                                on:click=move |_| apply_take_profit(id)
                                                            >
                                                                "Set"
                                                            </button>
                                                        </span>
                                                    }
                                                        .into_view()
                                                } else {
                                                    view! {
                                                        <span>
                                                            {take_profit
                                                                .map(|tp| format!("${:.2}", tp))
                                                                .unwrap_or_else(|| "—".to_string())}
                                                        </span>
                                                    }
                                                        .into_view()
                                                }
                                            }}
                                        </td>
                                        <td
                                            class:positive={order.pnl >= 0.0}
                                            class:negative={order.pnl < 0.0}
                                        >
                                            {format!("{:+.2}", order.pnl)}
                                        </td>
                                        <td>
                                            <button
                                                class="edit-btn"
                                                on:click=move |_| set_selected_order.set(Some(id))
                                            >
                                                "Edit"
                                            </button>
                                            " "
                                            <button class="close-btn" on:click=move |_| close_order(id)>
                                                "Close"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            {move || {
                open_orders()
                    .get()
                    .is_empty()
                    .then(|| {
                        view! {
                            <div class="empty-orders">
                                "No active positions in your portfolio." <br />
                                "Place a buy or sell order to begin trading."
                            </div>
                        }
                    })
            }}
        </div>
    }
}
