//! Browser entry point
//!
//! # Architecture
//! - `console.rs`: `log` records to the devtools console
//! - `page.rs`: [`Page`](crate::page::Page) over the live DOM
//! - `chartjs.rs`: Chart.js drawing backend
//! - `events.rs`: click/change listeners routed to the dashboard

mod chartjs;
mod console;
mod events;
mod page;

use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub use chartjs::{ChartJsBackend, ChartJsHandle};
pub use page::WebPage;

use crate::client::PortfolioClient;
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;

type WebDashboard = Dashboard<PortfolioClient, WebPage, ChartJsBackend>;

/// Module start: runs once the bundle is loaded, after the DOM is parsed
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let origin = window.location().origin()?;

    let body = document.body();
    let config = DashboardConfig::from_lookup(
        |key| {
            body.as_ref()
                .and_then(|body| body.get_attribute(&format!("data-{key}")))
        },
        &origin,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // level already validated by from_lookup
    console::init(config.level_filter().unwrap_or(log::LevelFilter::Info));

    let client = PortfolioClient::from_config(&config);
    let backend = ChartJsBackend::new(document.clone());
    let page = WebPage::new(window, document);
    let dashboard = Rc::new(Dashboard::new(client, page, backend, config));
    info!("Portfolio dashboard v{} loaded", env!("CARGO_PKG_VERSION"));

    dashboard.retain_for_page();
    events::wire(&dashboard);

    spawn_local(async move {
        dashboard.start().await;
    });
    Ok(())
}
