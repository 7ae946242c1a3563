#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod audio;
mod canvas;
mod dom;
mod frame;
mod visualizer;

pub use visualizer::{Visualizer, VisualizerOptions};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("raystream-web loaded");
    Ok(())
}
