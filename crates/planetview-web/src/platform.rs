//! Browser queries: user agent, container size and URL parameters
//!
//! Outside the browser these fall back to a desktop device with no URL
//! overrides, sized by the window.

use bevy::window::Window;

/// URL parameters the viewer understands
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const QUERY_KEYS: &[&str] = &["model", "start_frame", "total_frames", "start", "debug_cube"];

#[cfg(target_arch = "wasm32")]
pub fn user_agent() -> Option<String> {
    web_sys::window()?.navigator().user_agent().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn user_agent() -> Option<String> {
    None
}

/// Recognized `?key=value` pairs from the page URL
#[cfg(target_arch = "wasm32")]
pub fn query_pairs() -> Vec<(String, String)> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let Ok(href) = window.location().href() else {
        return Vec::new();
    };
    let Ok(url) = web_sys::Url::new(&href) else {
        return Vec::new();
    };

    let params = url.search_params();
    QUERY_KEYS
        .iter()
        .filter_map(|key| params.get(key).map(|value| (key.to_string(), value)))
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn query_pairs() -> Vec<(String, String)> {
    Vec::new()
}

/// Client size of the container element in CSS pixels, or the window size
/// when the element is missing
#[cfg(target_arch = "wasm32")]
pub fn container_size(container_id: &str, window: &Window) -> (f32, f32) {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(container_id))
        .map(|el| (el.client_width() as f32, el.client_height() as f32))
        .unwrap_or_else(|| (window.width(), window.height()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn container_size(_container_id: &str, window: &Window) -> (f32, f32) {
    (window.width(), window.height())
}
