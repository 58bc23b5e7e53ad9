//! Listly Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod controller;
mod debounce;
mod error;
mod logger;
mod mobile;
mod models;
mod projection;
mod store;

use app::App;
use config::ClientConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    let config = ClientConfig::load();
    logger::init(config.log_level());
    log::info!("[app] backend at {}", config.api_base);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
