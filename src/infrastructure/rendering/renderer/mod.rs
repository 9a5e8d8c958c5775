//! WebGPU renderer for the candle layer.
//!
//! Manages the GPU buffers and render pass for candle bodies and wicks. The
//! annotation layer lives on a separate 2D canvas (`overlay_renderer`). The
//! renderer sits behind a global handle so UI event handlers can reach it.

use crate::domain::chart::Chart;
use crate::domain::errors::{TerminalError, TerminalResult};
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::rendering::gpu_structures::{CandleVertex, ChartUniforms};
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static GLOBAL_RENDERER: RefCell<Option<Rc<RefCell<WebGpuRenderer>>>> = const { RefCell::new(None) };
}

/// Store the global renderer instance
pub fn set_global_renderer(renderer: Rc<RefCell<WebGpuRenderer>>) {
    GLOBAL_RENDERER.with(|cell| {
        *cell.borrow_mut() = Some(renderer);
    });
}

/// Obtain a mutable reference to the global renderer
pub fn with_global_renderer<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut WebGpuRenderer) -> R,
{
    GLOBAL_RENDERER.with(|cell| {
        let opt = cell.borrow_mut();
        opt.as_ref().map(|rc| f(&mut rc.borrow_mut()))
    })
}

/// WebGPU renderer for the candle layer
pub struct WebGpuRenderer {
    _canvas_id: String,
    width: u32,
    height: u32,

    // WGPU state
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    // Rendering pipeline
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_count: u32,

    // Cached frame geometry
    cached_hash: u64,
}

impl WebGpuRenderer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) -> TerminalResult<()> {
        if new_width == 0 || new_height == 0 {
            return Err(TerminalError::Rendering(format!(
                "invalid surface size {}x{}",
                new_width, new_height
            )));
        }

        self.width = new_width;
        self.height = new_height;
        self.config.width = new_width;
        self.config.height = new_height;
        self.surface.configure(&self.device, &self.config);

        get_logger().debug(
            LogComponent::Infrastructure("WebGpuRenderer"),
            &format!("🎯 Surface resized to {}x{}", new_width, new_height),
        );

        Ok(())
    }
}

mod geometry;
pub use geometry::{MIN_BODY_HEIGHT, WICK_WIDTH_RATIO, build_candle_vertices, create_geometry};
#[cfg(target_arch = "wasm32")]
mod initialization;
mod render_loop;
