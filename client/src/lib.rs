//! # client
//!
//! Leptos + WASM frontend for the Lily comic creator.
//!
//! This crate contains the page, presentational components, the comic
//! session state and its transition function, REST helpers, and the
//! sequential generation driver that walks a story panel by panel.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs the panic hook and console logger, then
/// hydrates the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("lily-comics hydrating");
    leptos::mount::hydrate_body(app::App);
}
