/// Value Object - Viewport (canvas dimensions plus the visible price band)
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800, height: 500, min_price: 0.0, max_price: 100.0 }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn price_span(&self) -> f64 {
        self.max_price - self.min_price
    }

    pub fn set_price_range(&mut self, min_price: f64, max_price: f64) {
        self.min_price = min_price;
        self.max_price = max_price;
    }

    /// Convert a price to a pixel Y coordinate (origin top-left, Y grows down)
    pub fn price_to_y(&self, price: f64) -> f64 {
        if self.price_span() == 0.0 {
            return self.height as f64 / 2.0;
        }
        let normalized = (price - self.min_price) / self.price_span();
        self.height as f64 * (1.0 - normalized)
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// CSS color string for the 2D overlay context
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round() as u32,
            (self.g * 255.0).round() as u32,
            (self.b * 255.0).round() as u32,
            self.a
        )
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    // TradingView-style palette carried over from the reference UI
    pub const BULLISH: Color = Color { r: 0.149, g: 0.651, b: 0.604, a: 1.0 }; // #26a69a
    pub const BEARISH: Color = Color { r: 0.937, g: 0.325, b: 0.314, a: 1.0 }; // #ef5350
    pub const GRID: Color = Color { r: 0.267, g: 0.267, b: 0.267, a: 1.0 }; // #444444
    pub const TEXT: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const STOP_LOSS: Color = Color { r: 1.0, g: 0.251, b: 0.0, a: 1.0 }; // #ff4000
    pub const TAKE_PROFIT: Color = Color { r: 0.0, g: 0.784, b: 0.325, a: 1.0 }; // #00c853
    pub const BACKGROUND: Color = Color { r: 0.102, g: 0.102, b: 0.18, a: 1.0 }; // #1a1a2e
}
