use super::value_objects::{Color, Viewport};
use crate::domain::market_data::{Candle, Price};
use crate::domain::trading::{Order, Side};
use crate::time_utils::format_time_label;

/// Horizontal gap fraction separating neighbouring candles (NDC units)
pub const CANDLE_GAP: f32 = 0.01;
/// Number of divisions in the overlay price grid
pub const PRICE_GRID_DIVISIONS: usize = 5;
/// One time-axis label per this many candles
pub const TIME_LABEL_STRIDE: usize = 10;

/// Visible price band used for vertical mapping
///
/// A degenerate band (min == max) is widened to a sentinel span of 1 so the
/// normalization never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        if min == max {
            Self { min: min - 0.5, max: max + 0.5 }
        } else {
            Self { min, max }
        }
    }

    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        let first = candles.first()?;
        let mut min = first.ohlc.low.value();
        let mut max = first.ohlc.high.value();
        for candle in candles {
            min = min.min(candle.ohlc.low.value());
            max = max.max(candle.ohlc.high.value());
        }
        Some(Self::new(min, max))
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map a price into the [-1, 1] vertical axis
    pub fn to_ndc(&self, price: f64) -> f32 {
        (((price - self.min) / self.span()) * 2.0 - 1.0) as f32
    }
}

/// One candle in normalized device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub x: f32,
    pub width: f32,
    pub open_y: f32,
    pub high_y: f32,
    pub low_y: f32,
    pub close_y: f32,
    pub bullish: bool,
}

/// Full geometry of the visible window, rebuilt on every redraw
#[derive(Debug, Clone)]
pub struct NormalizedGeometry {
    pub candles: Vec<CandleGeometry>,
    pub range: PriceRange,
}

/// Domain service - converts the candle window into drawable coordinates
///
/// Pure and non-incremental: the vertical scale depends on the min/max of
/// every visible candle, so any change remaps the whole window.
pub struct CoordinateMapper;

impl CoordinateMapper {
    pub fn map(candles: &[Candle], range: PriceRange) -> NormalizedGeometry {
        let count = candles.len();
        let width = if count == 0 { 0.0 } else { 2.0 / count as f32 - CANDLE_GAP };

        let mapped = candles
            .iter()
            .enumerate()
            .map(|(i, candle)| CandleGeometry {
                x: (i as f32 / count as f32) * 2.0 - 1.0 + CANDLE_GAP / 2.0,
                width,
                open_y: range.to_ndc(candle.ohlc.open.value()),
                high_y: range.to_ndc(candle.ohlc.high.value()),
                low_y: range.to_ndc(candle.ohlc.low.value()),
                close_y: range.to_ndc(candle.ohlc.close.value()),
                bullish: candle.is_bullish(),
            })
            .collect();

        NormalizedGeometry { candles: mapped, range }
    }
}

/// What a horizontal annotation line marks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayLineKind {
    Grid,
    CurrentPrice,
    Entry(Side),
    StopLoss,
    TakeProfit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub kind: OverlayLineKind,
    pub y: f64,
    pub color: Color,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

/// Annotation layer contents for one frame, in pixel coordinates
#[derive(Debug, Clone, Default)]
pub struct OverlayPlan {
    pub lines: Vec<OverlayLine>,
    pub labels: Vec<OverlayLabel>,
}

/// Domain service - lays out the annotation layer
///
/// Produces plain data; the canvas painter in the infrastructure layer only
/// replays it. Price grid, live-price line, per-order entry lines and dashed
/// protective levels, plus price and time labels.
pub struct OverlayPlanner;

impl OverlayPlanner {
    pub fn plan(
        viewport: &Viewport,
        candles: &[Candle],
        orders: &[Order],
        latest_price: Option<Price>,
    ) -> OverlayPlan {
        let mut plan = OverlayPlan::default();
        let width = viewport.width as f64;
        let height = viewport.height as f64;

        // Evenly spaced price grid across the visible band
        let step = viewport.price_span() / PRICE_GRID_DIVISIONS as f64;
        for i in 0..=PRICE_GRID_DIVISIONS {
            let price = viewport.min_price + step * i as f64;
            let y = viewport.price_to_y(price);
            plan.lines.push(OverlayLine { kind: OverlayLineKind::Grid, y, color: Color::GRID, dashed: false });
            plan.labels.push(OverlayLabel {
                text: format!("{:.2}", price),
                x: 5.0,
                y: y - 5.0,
                color: Color::TEXT,
            });
        }

        // Live-price line
        if let Some(price) = latest_price {
            let y = viewport.price_to_y(price.value());
            plan.lines.push(OverlayLine {
                kind: OverlayLineKind::CurrentPrice,
                y,
                color: Color::BULLISH,
                dashed: false,
            });
            plan.labels.push(OverlayLabel {
                text: format!("{:.2}", price.value()),
                x: width - 60.0,
                y: y - 5.0,
                color: Color::BULLISH,
            });
        }

        // Time axis, one label per stride
        let stamped: Vec<&Candle> = candles.iter().step_by(TIME_LABEL_STRIDE).collect();
        for (i, candle) in stamped.iter().enumerate() {
            plan.labels.push(OverlayLabel {
                text: format_time_label(candle.open_time.value()),
                x: (i as f64 / stamped.len() as f64) * width,
                y: height - 5.0,
                color: Color::TEXT,
            });
        }

        // Protective levels first, entries on top of them
        for order in orders {
            if let Some(stop) = order.stop_loss {
                let y = viewport.price_to_y(stop.value());
                plan.lines.push(OverlayLine {
                    kind: OverlayLineKind::StopLoss,
                    y,
                    color: Color::STOP_LOSS,
                    dashed: true,
                });
                plan.labels.push(OverlayLabel {
                    text: format!("SL: {:.2}", stop.value()),
                    x: width - 120.0,
                    y: y - 5.0,
                    color: Color::STOP_LOSS,
                });
            }

            if let Some(target) = order.take_profit {
                let y = viewport.price_to_y(target.value());
                plan.lines.push(OverlayLine {
                    kind: OverlayLineKind::TakeProfit,
                    y,
                    color: Color::TAKE_PROFIT,
                    dashed: true,
                });
                plan.labels.push(OverlayLabel {
                    text: format!("TP: {:.2}", target.value()),
                    x: width - 120.0,
                    y: y - 5.0,
                    color: Color::TAKE_PROFIT,
                });
            }
        }

        for order in orders {
            let color = match order.side {
                Side::Buy => Color::BULLISH,
                Side::Sell => Color::BEARISH,
            };
            let y = viewport.price_to_y(order.entry_price.value());
            plan.lines.push(OverlayLine {
                kind: OverlayLineKind::Entry(order.side),
                y,
                color,
                dashed: false,
            });
            plan.labels.push(OverlayLabel {
                text: format!(
                    "{} {} @ {:.2}",
                    order.side.label(),
                    order.quantity.value(),
                    order.entry_price.value()
                ),
                x: 10.0,
                y: y - 10.0,
                color,
            });
        }

        plan
    }
}
