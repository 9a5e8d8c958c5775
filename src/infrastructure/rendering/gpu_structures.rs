use bytemuck::{Pod, Zeroable};

/// GPU vertex for the candle layer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CandleVertex {
    /// X position (time axis, NDC)
    pub position_x: f32,
    /// Y position (price axis, NDC)
    pub position_y: f32,
    /// Element type: 0 = body, 1 = wick
    pub element_type: f32,
    /// For bodies: 1 = bullish, 0 = bearish; wicks ignore it
    pub color_type: f32,
}

impl CandleVertex {
    /// Create vertex for the candle body
    pub fn body_vertex(x: f32, y: f32, is_bullish: bool) -> Self {
        Self {
            position_x: x,
            position_y: y,
            element_type: 0.0,
            color_type: if is_bullish { 1.0 } else { 0.0 },
        }
    }

    /// Create vertex for the candle wick
    pub fn wick_vertex(x: f32, y: f32, is_bullish: bool) -> Self {
        Self {
            position_x: x,
            position_y: y,
            element_type: 1.0,
            color_type: if is_bullish { 1.0 } else { 0.0 },
        }
    }

    pub fn is_body(&self) -> bool {
        self.element_type < 0.5
    }

    /// Vertex buffer descriptor for wgpu
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CandleVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position_x
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32,
                },
                // position_y
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<f32>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
                // element_type
                wgpu::VertexAttribute {
                    offset: (2 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
                // color_type
                wgpu::VertexAttribute {
                    offset: (3 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Uniform buffer for global rendering parameters
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ChartUniforms {
    /// Viewport transformation matrix (identity; vertices arrive in NDC)
    pub view_proj_matrix: [[f32; 4]; 4],
    /// Viewport dimensions (width, height, min_price, max_price)
    pub viewport: [f32; 4],
    /// Body color for bullish candles
    pub bullish_color: [f32; 4],
    /// Body color for bearish candles
    pub bearish_color: [f32; 4],
    /// Rendering parameters (candle_width, gap, _padding, _padding)
    pub render_params: [f32; 4],
}

impl Default for ChartUniforms {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartUniforms {
    pub fn new() -> Self {
        use crate::domain::chart::Color;
        Self {
            view_proj_matrix: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            viewport: [800.0, 500.0, 0.0, 100.0],
            bullish_color: Color::BULLISH.to_array(),
            bearish_color: Color::BEARISH.to_array(),
            render_params: [0.0, 0.0, 0.0, 0.0],
        }
    }
}
