use wasm_bindgen::prelude::*;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod macros;
pub mod time_utils;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod global_state;
#[cfg(target_arch = "wasm32")]
pub mod presentation;

use crate::domain::logging::{LogComponent, get_logger};

/// Wire the browser implementations of the ambient services before anything
/// else runs
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(LogComponent::Presentation("Initialize"), "🚀 Trade terminal initialized");
}
