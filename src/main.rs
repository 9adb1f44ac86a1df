mod api;
mod app;
mod components;
mod config;
mod error;
mod pages;
mod render;
mod state;
mod workflow;

use leptos::prelude::*;

use app::App;
use config::ClientConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_page();
    if let Err(e) = console_log::init_with_level(config.log_level) {
        web_sys::console::error_1(&format!("Logger already set: {}", e).into());
    }
    log::info!(
        "Starting workbench against {}",
        if config.api_base.is_empty() { "same origin" } else { config.api_base.as_str() }
    );

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
