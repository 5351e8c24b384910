//! Bookstore Storefront Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod error;
mod models;
mod notice;

use any_spawner::Executor;

fn main() {
    console_error_panic_hook::set_once();
    if Executor::init_wasm_bindgen().is_err() {
        web_sys::console::warn_1(&"[PAGE] Async executor was already initialized".into());
    }
    if let Err(e) = app::start_page() {
        web_sys::console::error_2(&"[PAGE] Could not start:".into(), &e);
    }
}
