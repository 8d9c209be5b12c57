//! Risk breakdown polar-area chart
//!
//! Reads its data from JSON embedded in the page instead of the API. Each
//! asset class becomes one segment sized by weight and colored by risk tier.

use std::cell::RefCell;

use log::error;

use super::{RenderOutcome, present};
use crate::chart::palette::SEGMENT_BORDER;
use crate::chart::{
    ChartBackend, ChartConfig, ChartHandle, ChartKind, ChartSlot, Dataset, Legend, TooltipFormat,
};
use crate::page::Page;
use crate::types::{RiskBreakdown, RiskTier};

const SUBJECT: &str = "risk breakdown data";

pub fn risk_config(breakdown: &RiskBreakdown) -> ChartConfig {
    let entries = breakdown.entries();
    let labels = entries.iter().map(|(class, _)| class.clone()).collect();
    let weights = entries.iter().map(|(_, e)| e.weight * 100.0).collect();
    let scores: Vec<f64> = entries.iter().map(|(_, e)| e.risk_score).collect();
    let colors = scores
        .iter()
        .map(|score| RiskTier::from_score(*score).color().to_string())
        .collect();

    ChartConfig {
        kind: ChartKind::PolarArea,
        title: "Risk Breakdown by Asset Class".to_string(),
        labels,
        datasets: vec![Dataset {
            label: Some("Asset Class Weight (%)".to_string()),
            data: weights,
            background: colors,
            border_color: SEGMENT_BORDER.to_string(),
            border_width: 1,
            line: None,
        }],
        legend: Legend::Bottom { box_width: Some(15) },
        tooltip: TooltipFormat::RiskWeight { scores },
        tooltip_index_mode: false,
        axes: None,
        radial_axis: false,
    }
}

pub struct RiskChart<H: ChartHandle> {
    container_id: String,
    data_id: String,
    slot: RefCell<ChartSlot<H>>,
}

impl<H: ChartHandle> RiskChart<H> {
    pub fn new(container_id: impl Into<String>, data_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            data_id: data_id.into(),
            slot: RefCell::new(ChartSlot::new()),
        }
    }

    /// Draw from the embedded data; skipped when the data element is missing
    pub fn render<P, B>(&self, page: &P, backend: &B) -> RenderOutcome
    where
        P: Page,
        B: ChartBackend<Handle = H>,
    {
        let Some(text) = page.text_content(&self.data_id) else {
            error!("Risk breakdown data not found (#{})", self.data_id);
            return RenderOutcome::Skipped;
        };

        let config = RiskBreakdown::from_json(&text).map(|breakdown| risk_config(&breakdown));
        present(page, backend, &self.slot, &self.container_id, config, SUBJECT)
    }
}
