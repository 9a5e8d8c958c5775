use crate::domain::{
    errors::{TerminalError, TerminalResult},
    logging::{LogComponent, get_logger},
    market_data::{Candle, Ohlc, Price, Symbol, TimeInterval, Timestamp},
};
use gloo_net::http::Request;
use serde::Deserialize;

/// Row of the Binance klines REST response
#[derive(Debug, Deserialize)]
struct BinanceHistoricalKline(
    u64,                   // Open time
    String,                // Open
    String,                // High
    String,                // Low
    String,                // Close
    serde::de::IgnoredAny, // Volume
    serde::de::IgnoredAny, // Close time
    serde::de::IgnoredAny, // Quote asset volume
    serde::de::IgnoredAny, // Number of trades
    serde::de::IgnoredAny, // Taker buy base asset volume
    serde::de::IgnoredAny, // Taker buy quote asset volume
    serde::de::IgnoredAny, // Ignore
);

/// One-shot historical loader against the Binance REST API
#[derive(Debug, Clone, Default)]
pub struct BinanceHttpClient;

impl BinanceHttpClient {
    pub fn new() -> Self {
        Self
    }

    /// Fetch the most recent candle window for a symbol/timeframe
    pub async fn fetch_history(
        &self,
        symbol: &Symbol,
        interval: TimeInterval,
        limit: usize,
    ) -> TerminalResult<Vec<Candle>> {
        let symbol_upper = symbol.value().to_uppercase();
        let interval_str = interval.to_binance_str();

        let url = format!(
            "https://api.binance.com/api/v3/klines?symbol={symbol_upper}&interval={interval_str}&limit={limit}"
        );

        get_logger().info(
            LogComponent::Infrastructure("BinanceAPI"),
            &format!("📈 Fetching {limit} historical candles from: {url}"),
        );

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| TerminalError::Feed(format!("Failed to fetch historical data: {e:?}")))?;

        if !response.ok() {
            return Err(TerminalError::Feed(format!("HTTP error: {}", response.status())));
        }

        let klines: Vec<BinanceHistoricalKline> = response
            .json()
            .await
            .map_err(|e| TerminalError::Feed(format!("Failed to parse JSON: {e:?}")))?;

        let mut candles = Vec::with_capacity(klines.len());
        for kline in klines {
            candles.push(parse_kline(kline)?);
        }

        get_logger().info(
            LogComponent::Infrastructure("BinanceAPI"),
            &format!("✅ Loaded {} historical candles for {}", candles.len(), symbol_upper),
        );

        Ok(candles)
    }
}

fn parse_kline(kline: BinanceHistoricalKline) -> TerminalResult<Candle> {
    let open = parse_price(&kline.1, "open")?;
    let high = parse_price(&kline.2, "high")?;
    let low = parse_price(&kline.3, "low")?;
    let close = parse_price(&kline.4, "close")?;

    Ok(Candle::new(Timestamp::from_millis(kline.0), Ohlc::new(open, high, low, close)))
}

fn parse_price(raw: &str, field: &str) -> TerminalResult<Price> {
    raw.parse::<f64>()
        .map(Price::from)
        .map_err(|_| TerminalError::Validation(format!("Invalid {field} price: {raw}")))
}
