//! Portfolio Dashboard - WebAssembly front end for a multi-asset portfolio
//!
//! Draws the dashboard charts from the portfolio API and wires the page's
//! controls (bulk price update, period selector, delete confirmation).
//!
//! # Architecture
//! - `web` module is the browser entry point (`#[wasm_bindgen(start)]`)
//! - `Dashboard` probes the page and owns one widget per chart container
//! - Widgets talk to three seams: `PortfolioApi`, `Page`, `ChartBackend`
//!
//! # Features
//! - Portfolio value line chart with selectable period
//! - Asset allocation doughnut and sector allocation bars
//! - Risk breakdown polar-area chart from data embedded in the page
//! - Bulk price update with a single POST
//! - en-US currency, percentage and number formatting

// Clippy configuration for chart and formatting code
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // wasm-bindgen callback patterns

mod chart;
mod client;
mod config;
mod dashboard;
mod error;
mod format;
mod page;
mod prices;
mod types;
mod widgets;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod web;

pub use chart::chartjs::{callback_paths, to_chartjs};
pub use chart::palette;
pub use chart::{
    Axes, ChartBackend, ChartConfig, ChartHandle, ChartKind, ChartSlot, Dataset, Legend,
    LineStyle, TickFormat, TooltipFormat,
};
pub use client::{PortfolioApi, PortfolioClient};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, Feature, StartReport, parse_period, probe};
pub use error::{DashboardError, Result};
pub use format::{calculate_gain_loss, format_currency, format_number, format_percentage};
pub use page::{LOADING_HTML, Page, SecurityRow, error_notice_html, ids, selectors};
pub use prices::{SubmitOutcome, collect_batch, submit};
pub use types::*;
pub use widgets::{
    AllocationChart, PerformanceChart, RenderOutcome, RiskChart, SectorChart, allocation_config,
    performance_config, risk_config, sector_config,
};

#[cfg(target_arch = "wasm32")]
pub use web::{ChartJsBackend, ChartJsHandle, WebPage, start};
