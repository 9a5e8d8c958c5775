use crate::domain::chart::{Color, OverlayPlan};
use crate::domain::errors::{TerminalError, TerminalResult};
use crate::domain::logging::{LogComponent, get_logger};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D painter for the annotation layer
///
/// Replays an `OverlayPlan` onto the overlay canvas sitting above the WebGPU
/// surface: price grid, live-price line, order entry lines, dashed
/// protective levels and the axis labels.
pub struct CanvasOverlayRenderer {
    canvas_id: String,
    width: u32,
    height: u32,
}

impl CanvasOverlayRenderer {
    pub fn new(canvas_id: String, width: u32, height: u32) -> Self {
        Self { canvas_id, width, height }
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn get_canvas_context(&self) -> TerminalResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas = gloo::utils::document()
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| {
                TerminalError::Rendering(format!("Overlay canvas '{}' not found", self.canvas_id))
            })?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| TerminalError::Rendering("Element is not a canvas".to_string()))?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        let context = canvas
            .get_context("2d")
            .map_err(|_| TerminalError::Rendering("Failed to get 2D context".to_string()))?
            .ok_or_else(|| TerminalError::Rendering("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| TerminalError::Rendering("Failed to cast to 2D context".to_string()))?;

        Ok((canvas, context))
    }

    /// Full-frame clear and replay of the annotation plan
    pub fn paint(&self, plan: &OverlayPlan) -> TerminalResult<()> {
        let (_canvas, context) = self.get_canvas_context()?;

        context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let solid = js_sys::Array::new();
        let dash_pattern = js_sys::Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(3.0));

        for line in &plan.lines {
            context.set_stroke_style(&JsValue::from(line.color.to_css()));
            context.set_line_width(1.0);
            if line.dashed {
                let _ = context.set_line_dash(&dash_pattern);
            }
            context.begin_path();
            context.move_to(0.0, line.y);
            context.line_to(self.width as f64, line.y);
            context.stroke();
            if line.dashed {
                let _ = context.set_line_dash(&solid);
            }
        }

        context.set_font("12px Arial");
        for label in &plan.labels {
            context.set_fill_style(&JsValue::from(label.color.to_css()));
            if let Err(e) = context.fill_text(&label.text, label.x, label.y) {
                get_logger().warn(
                    LogComponent::Infrastructure("OverlayRenderer"),
                    &format!("⚠️ Failed to draw label '{}': {:?}", label.text, e),
                );
            }
        }

        Ok(())
    }

    /// Centered placeholder while the first history load is in flight
    pub fn paint_loading_message(&self) -> TerminalResult<()> {
        let (_canvas, context) = self.get_canvas_context()?;
        context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        context.set_fill_style(&JsValue::from(Color::TEXT.to_css()));
        context.set_font("16px Arial");
        context
            .fill_text("No chart data available - Loading...", 50.0, self.height as f64 / 2.0)
            .map_err(|e| TerminalError::Rendering(format!("{:?}", e)))?;
        Ok(())
    }
}
