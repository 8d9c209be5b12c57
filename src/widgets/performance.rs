//! Portfolio performance line chart
//!
//! First render uses the configured range; a period change tears the chart
//! down, shows the loading placeholder, and rebuilds it from a new fetch.
//! Overlapping refreshes are not cancelled: whichever completes last owns the
//! container.

use std::cell::RefCell;

use log::{debug, error};

use super::{RenderOutcome, present};
use crate::chart::palette::{LINE_FILL, LINE_STROKE};
use crate::chart::{
    Axes, ChartBackend, ChartConfig, ChartHandle, ChartKind, ChartSlot, Dataset, Legend,
    LineStyle, TickFormat, TooltipFormat,
};
use crate::client::PortfolioApi;
use crate::error::Result;
use crate::page::Page;
use crate::types::TimeSeries;

const SUBJECT: &str = "performance data";

/// Line chart configuration for a value series; `selected_days` is the
/// period picked on the selector, `None` on the initial render
pub fn performance_config(series: &TimeSeries, selected_days: Option<u32>) -> ChartConfig {
    let title = match selected_days {
        Some(days) => format!("Portfolio Performance ({days} days)"),
        None => "Portfolio Performance Over Time".to_string(),
    };

    ChartConfig {
        kind: ChartKind::Line,
        title,
        labels: series.dates().to_vec(),
        datasets: vec![Dataset {
            label: Some("Portfolio Value ($)".to_string()),
            data: series.values().to_vec(),
            background: vec![LINE_FILL.to_string()],
            border_color: LINE_STROKE.to_string(),
            border_width: 2,
            line: Some(LineStyle {
                fill: true,
                tension: 0.4,
                point_color: LINE_STROKE.to_string(),
            }),
        }],
        legend: Legend::Bottom { box_width: None },
        tooltip: TooltipFormat::PortfolioValue,
        tooltip_index_mode: true,
        axes: Some(Axes {
            horizontal: false,
            value_begin_at_zero: true,
            value_ticks: Some(TickFormat::Currency),
            category_grid: false,
        }),
        radial_axis: false,
    }
}

/// Performance widget bound to one container
pub struct PerformanceChart<H: ChartHandle> {
    container_id: String,
    slot: RefCell<ChartSlot<H>>,
}

impl<H: ChartHandle> PerformanceChart<H> {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            slot: RefCell::new(ChartSlot::new()),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Initial render: fetch the series for `days` and build the chart
    pub async fn render<A, P, B>(
        &self,
        api: &A,
        page: &P,
        backend: &B,
        days: Option<u32>,
    ) -> RenderOutcome
    where
        A: PortfolioApi,
        P: Page,
        B: ChartBackend<Handle = H>,
    {
        let config = fetch_config(api, days, None).await;
        present(page, backend, &self.slot, &self.container_id, config, SUBJECT)
    }

    /// Period-change path: drop the current chart, show the loading
    /// placeholder, then render from scratch
    pub async fn refresh<A, P, B>(
        &self,
        api: &A,
        page: &P,
        backend: &B,
        days: Option<u32>,
    ) -> RenderOutcome
    where
        A: PortfolioApi,
        P: Page,
        B: ChartBackend<Handle = H>,
    {
        debug!("Refreshing performance chart for {days:?} days");
        self.slot.borrow_mut().clear();
        if let Err(e) = page.show_loading(&self.container_id) {
            error!("Cannot show performance loading indicator: {e}");
        }
        let config = fetch_config(api, days, days).await;
        present(page, backend, &self.slot, &self.container_id, config, SUBJECT)
    }
}

async fn fetch_config<A: PortfolioApi>(
    api: &A,
    days: Option<u32>,
    selected_days: Option<u32>,
) -> Result<ChartConfig> {
    let response = api.portfolio_performance(days).await?;
    let series = TimeSeries::try_from(response)?;
    Ok(performance_config(&series, selected_days))
}
