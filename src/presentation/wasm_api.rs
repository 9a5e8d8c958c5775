use crate::app::App;
use crate::domain::logging::{LogComponent, get_logger};
use leptos::*;
use wasm_bindgen::prelude::*;

/// Mount the workstation UI into the document body
#[wasm_bindgen]
pub fn start_terminal() {
    get_logger().info(LogComponent::Presentation("WasmApi"), "🚀 Mounting trade terminal");
    mount_to_body(App);
}
