use crate::domain::chart::{CANDLE_GAP, Chart, CoordinateMapper, NormalizedGeometry, PriceRange};
use crate::infrastructure::rendering::gpu_structures::{CandleVertex, ChartUniforms};

/// Wick width relative to the candle body
pub const WICK_WIDTH_RATIO: f32 = 0.1;
/// Floor for doji bodies so they stay visible
pub const MIN_BODY_HEIGHT: f32 = 0.004;

/// Vertices for one frame of the candle layer: a thin high-to-low quad for
/// each wick and a filled open-to-close quad for each body, all in NDC.
pub fn build_candle_vertices(geometry: &NormalizedGeometry) -> Vec<CandleVertex> {
    let mut vertices = Vec::with_capacity(geometry.candles.len() * 12);

    for candle in &geometry.candles {
        let half_width = candle.width * 0.5;
        let wick_half = (candle.width * WICK_WIDTH_RATIO * 0.5).max(0.0005);

        // Wick first, so the body paints over it
        vertices.extend_from_slice(&quad(
            candle.x - wick_half,
            candle.low_y,
            candle.x + wick_half,
            candle.high_y,
            candle.bullish,
            CandleVertex::wick_vertex,
        ));

        let body_bottom = candle.open_y.min(candle.close_y);
        let mut body_top = candle.open_y.max(candle.close_y);
        if body_top - body_bottom < MIN_BODY_HEIGHT {
            body_top = body_bottom + MIN_BODY_HEIGHT;
        }

        vertices.extend_from_slice(&quad(
            candle.x - half_width,
            body_bottom,
            candle.x + half_width,
            body_top,
            candle.bullish,
            CandleVertex::body_vertex,
        ));
    }

    vertices
}

/// Axis-aligned quad as two CCW triangles
fn quad(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    bullish: bool,
    vertex: fn(f32, f32, bool) -> CandleVertex,
) -> [CandleVertex; 6] {
    [
        vertex(x1, y1, bullish),
        vertex(x2, y1, bullish),
        vertex(x1, y2, bullish),
        vertex(x2, y1, bullish),
        vertex(x2, y2, bullish),
        vertex(x1, y2, bullish),
    ]
}

/// Full candle-layer geometry for the chart's current window
pub fn create_geometry(chart: &Chart) -> (Vec<CandleVertex>, ChartUniforms) {
    let candles = chart.series.to_vec();

    let Some(range) = PriceRange::from_candles(&candles) else {
        return (Vec::new(), ChartUniforms::new());
    };

    let geometry = CoordinateMapper::map(&candles, range);
    let vertices = build_candle_vertices(&geometry);

    let candle_width = geometry.candles.first().map(|c| c.width).unwrap_or(0.0);
    let uniforms = ChartUniforms {
        viewport: [
            chart.viewport.width as f32,
            chart.viewport.height as f32,
            range.min() as f32,
            range.max() as f32,
        ],
        render_params: [candle_width, CANDLE_GAP, 0.0, 0.0],
        ..ChartUniforms::new()
    };

    (vertices, uniforms)
}
