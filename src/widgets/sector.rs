//! Sector allocation bars
//!
//! Sectors with a zero or negative weight are dropped before drawing; the
//! rest keep their order. Labels sit on the category axis, so no legend.

use std::cell::RefCell;

use super::{RenderOutcome, present};
use crate::chart::palette::{self, SEGMENT_BORDER};
use crate::chart::{
    Axes, ChartBackend, ChartConfig, ChartHandle, ChartKind, ChartSlot, Dataset, Legend,
    TickFormat, TooltipFormat,
};
use crate::client::PortfolioApi;
use crate::error::Result;
use crate::page::Page;
use crate::types::CategoryDistribution;

const SUBJECT: &str = "sector allocation data";

/// Bar chart configuration; filters out non-positive sectors
pub fn sector_config(distribution: CategoryDistribution) -> ChartConfig {
    let visible = distribution.positive_only();

    ChartConfig {
        kind: ChartKind::Bar,
        title: "Sector Allocation".to_string(),
        labels: visible.labels().to_vec(),
        datasets: vec![Dataset {
            label: Some("Allocation (%)".to_string()),
            data: visible.values().to_vec(),
            background: palette::colors_for(&palette::SECTOR, visible.len()),
            border_color: SEGMENT_BORDER.to_string(),
            border_width: 1,
            line: None,
        }],
        legend: Legend::Hidden,
        tooltip: TooltipFormat::Allocation,
        tooltip_index_mode: false,
        axes: Some(Axes {
            horizontal: true,
            value_begin_at_zero: true,
            value_ticks: Some(TickFormat::PercentSuffix),
            category_grid: false,
        }),
        radial_axis: false,
    }
}

pub struct SectorChart<H: ChartHandle> {
    container_id: String,
    slot: RefCell<ChartSlot<H>>,
}

impl<H: ChartHandle> SectorChart<H> {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            slot: RefCell::new(ChartSlot::new()),
        }
    }

    pub async fn render<A, P, B>(&self, api: &A, page: &P, backend: &B) -> RenderOutcome
    where
        A: PortfolioApi,
        P: Page,
        B: ChartBackend<Handle = H>,
    {
        let config = fetch_config(api).await;
        present(page, backend, &self.slot, &self.container_id, config, SUBJECT)
    }
}

async fn fetch_config<A: PortfolioApi>(api: &A) -> Result<ChartConfig> {
    let distribution = CategoryDistribution::try_from(api.sector_allocation().await?)?;
    Ok(sector_config(distribution))
}
