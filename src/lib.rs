use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::DashboardConfig;
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::http::ChartApiClient;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
mod macros;

/// Initialize the application with proper DDD architecture
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    // Initialize logger with infrastructure implementation
    let console_logger = if cfg!(debug_assertions) {
        infrastructure::services::ConsoleLogger::new_development()
    } else {
        infrastructure::services::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(console_logger));

    // Initialize time provider with browser implementation
    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    let config = DashboardConfig::default();
    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 Stock dashboard starting against {}", config.api_base_url),
    );

    let client = ChartApiClient::new(&config.api_base_url);
    wasm_bindgen_futures::spawn_local(async move {
        client.health_check().await;
    });

    mount_to_body(move || view! { <App config=config.clone() /> });
}
