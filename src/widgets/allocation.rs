//! Asset allocation doughnut

use std::cell::RefCell;

use super::{RenderOutcome, present};
use crate::chart::palette::{self, SEGMENT_BORDER};
use crate::chart::{
    ChartBackend, ChartConfig, ChartHandle, ChartKind, ChartSlot, Dataset, Legend, TooltipFormat,
};
use crate::client::PortfolioApi;
use crate::error::Result;
use crate::page::Page;
use crate::types::CategoryDistribution;

const SUBJECT: &str = "asset allocation data";

pub fn allocation_config(distribution: &CategoryDistribution) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        title: "Asset Allocation".to_string(),
        labels: distribution.labels().to_vec(),
        datasets: vec![Dataset {
            label: None,
            data: distribution.values().to_vec(),
            background: palette::colors_for(&palette::ALLOCATION, distribution.len()),
            border_color: SEGMENT_BORDER.to_string(),
            border_width: 1,
            line: None,
        }],
        legend: Legend::Right { box_width: Some(15) },
        tooltip: TooltipFormat::LabelledPercent,
        tooltip_index_mode: false,
        axes: None,
        radial_axis: false,
    }
}

pub struct AllocationChart<H: ChartHandle> {
    container_id: String,
    slot: RefCell<ChartSlot<H>>,
}

impl<H: ChartHandle> AllocationChart<H> {
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
    let distribution = CategoryDistribution::try_from(api.asset_allocation().await?)?;
    Ok(allocation_config(&distribution))
}
