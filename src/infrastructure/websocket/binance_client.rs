use crate::domain::{
    errors::{TerminalError, TerminalResult},
    logging::{LogComponent, get_logger},
    market_data::{Ohlc, Price, Symbol, Tick, TimeInterval, Timestamp},
};
use futures::StreamExt;
use gloo_net::websocket::futures::WebSocket;
use serde::Deserialize;

/// Binance WebSocket client based on gloo
///
/// Delivers kline updates as domain ticks. Reconnects with capped
/// exponential backoff; the owning task is aborted from outside on
/// timeframe switch or teardown, which tears the socket down with it.
pub struct BinanceWebSocketClient {
    symbol: Symbol,
    interval: TimeInterval,
}

#[derive(Debug, Deserialize)]
struct BinanceKlineData {
    #[serde(rename = "k")]
    kline: KlineInfo,
}

#[derive(Debug, Deserialize)]
struct KlineInfo {
    #[serde(rename = "t")]
    open_time: u64,
    #[serde(rename = "o")]
    open: String,
    #[serde(rename = "h")]
    high: String,
    #[serde(rename = "l")]
    low: String,
    #[serde(rename = "c")]
    close: String,
}

impl BinanceWebSocketClient {
    pub fn new(symbol: Symbol, interval: TimeInterval) -> Self {
        Self { symbol, interval }
    }

    /// Connect to the Binance kline stream
    pub async fn connect(&mut self) -> TerminalResult<WebSocket> {
        let symbol_lower = self.symbol.value().to_lowercase();
        let interval_str = self.interval.to_binance_str();

        let stream_name = format!("{symbol_lower}@kline_{interval_str}");
        let url = format!("wss://stream.binance.com:9443/ws/{stream_name}");

        get_logger().info(
            LogComponent::Infrastructure("BinanceWS"),
            &format!("🔌 Connecting to Binance: {url}"),
        );

        let ws = WebSocket::open(&url)
            .map_err(|e| TerminalError::Feed(format!("Failed to open WebSocket: {e:?}")))?;

        get_logger().info(
            LogComponent::Infrastructure("BinanceWS"),
            &format!("✅ Connected to Binance stream: {stream_name}"),
        );

        Ok(ws)
    }

    /// Decode one stream message into a tick
    pub fn parse_message(&self, data: &str) -> TerminalResult<Tick> {
        let kline_data: BinanceKlineData = serde_json::from_str(data)
            .map_err(|e| TerminalError::Validation(format!("Failed to parse Binance message: {e}")))?;

        let kline = &kline_data.kline;

        let open = parse_price(&kline.open, "open")?;
        let high = parse_price(&kline.high, "high")?;
        let low = parse_price(&kline.low, "low")?;
        let close = parse_price(&kline.close, "close")?;

        Ok(Tick::new(
            Timestamp::from_millis(kline.open_time),
            Ohlc::new(open, high, low, close),
        ))
    }

    /// Run the stream until the owning task is aborted
    pub async fn run_stream<F>(&mut self, mut handler: F) -> TerminalResult<()>
    where
        F: FnMut(Tick) + 'static,
    {
        use gloo_timers::future::sleep;
        use std::time::Duration;

        let mut delay = 1u64;
        loop {
            let mut stream = match self.connect().await {
                Ok(ws) => {
                    delay = 1;
                    ws
                }
                Err(e) => {
                    get_logger().error(
                        LogComponent::Infrastructure("BinanceWS"),
                        &format!("❌ Connection error: {e}"),
                    );
                    sleep(Duration::from_secs(delay)).await;
                    delay = (delay * 2).min(32);
                    continue;
                }
            };

            while let Some(msg) = stream.next().await {
                match msg {
                    Ok(gloo_net::websocket::Message::Text(data)) => match self.parse_message(&data) {
                        Ok(tick) => {
                            handler(tick);
                        }
                        Err(e) => {
                            get_logger().error(
                                LogComponent::Infrastructure("BinanceWS"),
                                &format!("❌ Failed to parse message: {e}"),
                            );
                        }
                    },
                    Ok(_) => {
                        // Ignore binary messages
                    }
                    Err(e) => {
                        get_logger().error(
                            LogComponent::Infrastructure("BinanceWS"),
                            &format!("❌ WebSocket error: {e:?}"),
                        );
                        break;
                    }
                }
            }

            get_logger().warn(
                LogComponent::Infrastructure("BinanceWS"),
                &format!("🔌 Reconnecting in {delay}s"),
            );
            sleep(Duration::from_secs(delay)).await;
            delay = (delay * 2).min(32);
        }
    }
}

fn parse_price(raw: &str, field: &str) -> TerminalResult<Price> {
    raw.parse::<f64>()
        .map(Price::from)
        .map_err(|_| TerminalError::Validation(format!("Invalid {field} price: {raw}")))
}
