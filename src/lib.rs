pub mod account;
pub mod api;
pub mod builder;
pub mod common;
pub mod config;
pub mod frontend;
pub mod models;
pub mod routes;
pub mod services;
pub mod types;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(frontend::App);
}
