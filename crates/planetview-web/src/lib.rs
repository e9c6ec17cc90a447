//! Planetview Web - Browser viewer for a single GLTF model
//!
//! Renders the model into the page canvas with Bevy, rotates it on mouse or
//! touch drag, rescales it with its container and plays its animation clips.

mod app;
mod input;
mod models;
mod platform;
mod scene;

use planetview_core::ViewerConfig;
use wasm_bindgen::prelude::*;

/// Defaults shipped with the viewer; URL parameters override some keys
const EMBEDDED_CONFIG: &str = include_str!("../viewer.toml");

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Log level has to be known before the subscriber exists, so read it
    // from the embedded document without any overrides
    let max_level = ViewerConfig::from_toml(EMBEDDED_CONFIG)
        .map(|config| config.max_log_level())
        .unwrap_or(tracing::Level::INFO);
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(max_level)
            .build()
    );

    let config = ViewerConfig::resolve(EMBEDDED_CONFIG, platform::query_pairs());

    // Run the Bevy app
    app::run(config);
}
