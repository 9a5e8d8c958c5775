pub mod gpu_structures;
pub mod overlay_renderer;
pub mod renderer;

pub use overlay_renderer::CanvasOverlayRenderer;
pub use renderer::{WebGpuRenderer, set_global_renderer, with_global_renderer};
