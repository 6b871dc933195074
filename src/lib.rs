//! # tradeview
//!
//! Leptos + WASM client that keeps a trade-route view in sync with its
//! backend. Routes and route summaries are polled, the activity log is
//! streamed over server-sent events, and market-window and create-route
//! commands are sent back on user action.
//!
//! Everything with invariants (sources, reconnect policy, keyed
//! transitions, formatting) runs without a browser so it can be tested
//! natively; only the `hydrate` build touches the network.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
