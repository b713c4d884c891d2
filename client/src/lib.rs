//! # client
//!
//! Leptos + WASM front end for the assistant chat. Two surfaces share one
//! component set: the full-screen chat page (with the project admin route)
//! and the embeddable widget exposed to host pages as `ChatWidget`.
//!
//! All conversation, connectivity, and settings logic lives in the `chatbot`
//! crate; this crate supplies its browser seams (`fetch` backend,
//! `localStorage`, a signal-backed presenter) and renders the result.

pub mod app;
pub mod components;
#[cfg(feature = "csr")]
pub mod embed;
pub mod net;
pub mod pages;
pub mod presenter;
pub mod state;
pub mod util;

/// Route browser console output through `log` and surface panics there.
#[cfg(feature = "csr")]
fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Entry point for the standalone chat application.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn mount_app() {
    init_logging();
    leptos::mount::mount_to_body(app::App);
}

/// Prepare logging for an embedding host; call before `new ChatWidget()`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = initWidgetRuntime)]
pub fn init_widget_runtime() {
    init_logging();
}
