//! Chart model and drawing interface
//!
//! Widgets describe what to draw with a [`ChartConfig`]; a [`ChartBackend`]
//! turns it into pixels and hands back an owned [`ChartHandle`]. Widgets keep
//! their handle in a [`ChartSlot`], which destroys the previous chart before a
//! new one takes its place.
//!
//! # Architecture
//! - `palette.rs`: fixed category colors and the overflow rule
//! - `chartjs.rs`: Chart.js configuration document for a [`ChartConfig`]

pub mod chartjs;
pub mod palette;

use serde::Serialize;

use crate::error::Result;
use crate::format::{format_number, to_fixed};

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Doughnut,
    Bar,
    PolarArea,
}

/// Line-only series styling
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub fill: bool,
    pub tension: f64,
    pub point_color: String,
}

/// One series of values
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// One color per point for proportional charts, a single color for lines
    pub background: Vec<String>,
    pub border_color: String,
    pub border_width: u32,
    pub line: Option<LineStyle>,
}

/// Legend placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legend {
    Hidden,
    Bottom { box_width: Option<u32> },
    Right { box_width: Option<u32> },
}

/// Tooltip text for a hovered point
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipFormat {
    /// `Value: $1234.50`
    PortfolioValue,
    /// `Stock: 45.00%`
    LabelledPercent,
    /// `Allocation: 12.50%`
    Allocation,
    /// `Weight: 30.00%` then `Risk Score: 5`; scores are index-aligned with the data
    RiskWeight { scores: Vec<f64> },
}

impl TooltipFormat {
    /// Lines shown for the point at `index` with label `label` and value `value`
    pub fn lines(&self, label: &str, value: f64, index: usize) -> Vec<String> {
        match self {
            TooltipFormat::PortfolioValue => vec![format!("Value: ${}", to_fixed(value, 2))],
            TooltipFormat::LabelledPercent => vec![format!("{label}: {}%", to_fixed(value, 2))],
            TooltipFormat::Allocation => vec![format!("Allocation: {}%", to_fixed(value, 2))],
            TooltipFormat::RiskWeight { scores } => {
                let mut lines = vec![format!("Weight: {}%", to_fixed(value, 2))];
                if let Some(score) = scores.get(index) {
                    lines.push(format!("Risk Score: {score}"));
                }
                lines
            }
        }
    }
}

/// Value-axis tick labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// `$50,000`
    Currency,
    /// `25%`
    PercentSuffix,
}

impl TickFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            TickFormat::Currency => format!("${}", format_number(value)),
            TickFormat::PercentSuffix => format!("{value}%"),
        }
    }
}

/// Cartesian axis setup; `None` on a radial chart
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// Bars run along the y axis instead of x
    pub horizontal: bool,
    pub value_begin_at_zero: bool,
    pub value_ticks: Option<TickFormat>,
    pub category_grid: bool,
}

/// Everything a backend needs to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub legend: Legend,
    pub tooltip: TooltipFormat,
    /// Tooltip lists every dataset at the hovered index
    pub tooltip_index_mode: bool,
    pub axes: Option<Axes>,
    /// Show the radial scale of polar-area charts
    pub radial_axis: bool,
}

impl ChartConfig {
    /// Number of points in the first series
    pub fn point_count(&self) -> usize {
        self.datasets.first().map_or(0, |d| d.data.len())
    }

    /// Tooltip lines for the point at `index` of the first series
    pub fn tooltip_at(&self, index: usize) -> Vec<String> {
        let label = self.labels.get(index).map_or("", String::as_str);
        let value = self
            .datasets
            .first()
            .and_then(|d| d.data.get(index))
            .copied()
            .unwrap_or(0.0);
        self.tooltip.lines(label, value, index)
    }
}

/// A live chart owned by exactly one widget
pub trait ChartHandle {
    /// Tear the chart down and release everything it holds
    fn destroy(self);
}

/// Drawing collaborator: builds a chart inside a prepared container
pub trait ChartBackend {
    type Handle: ChartHandle;

    fn draw(&self, container_id: &str, config: &ChartConfig) -> Result<Self::Handle>;
}

/// Holder for the chart currently shown in one container
pub struct ChartSlot<H: ChartHandle> {
    current: Option<H>,
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Destroy the current chart, if any
    pub fn clear(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.destroy();
        }
    }

    /// Replace the current chart with `handle`
    pub fn install(&mut self, handle: H) {
        self.clear();
        self.current = Some(handle);
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }
}

impl<H: ChartHandle> Default for ChartSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingHandle(Rc<Cell<u32>>);

    impl ChartHandle for CountingHandle {
        fn destroy(self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_slot_destroys_previous_chart() {
        let destroyed = Rc::new(Cell::new(0));
        let mut slot = ChartSlot::new();

        slot.install(CountingHandle(destroyed.clone()));
        assert_eq!(destroyed.get(), 0);

        slot.install(CountingHandle(destroyed.clone()));
        assert_eq!(destroyed.get(), 1);
        assert!(slot.is_occupied());

        slot.clear();
        assert_eq!(destroyed.get(), 2);
        assert!(!slot.is_occupied());
    }

    #[test]
    fn test_slot_destroys_on_drop() {
        let destroyed = Rc::new(Cell::new(0));
        {
            let mut slot = ChartSlot::new();
            slot.install(CountingHandle(destroyed.clone()));
        }
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn test_tooltip_lines() {
        assert_eq!(
            TooltipFormat::PortfolioValue.lines("2024-01-01", 1234.5, 0),
            ["Value: $1234.50"]
        );
        assert_eq!(
            TooltipFormat::LabelledPercent.lines("Stock", 45.0, 0),
            ["Stock: 45.00%"]
        );
        assert_eq!(
            TooltipFormat::Allocation.lines("Tech", 12.346, 0),
            ["Allocation: 12.35%"]
        );

        let risk = TooltipFormat::RiskWeight { scores: vec![5.0, 2.5] };
        assert_eq!(risk.lines("Bonds", 30.0, 1), ["Weight: 30.00%", "Risk Score: 2.5"]);
        assert_eq!(risk.lines("Stock", 60.0, 0), ["Weight: 60.00%", "Risk Score: 5"]);
    }

    #[test]
    fn test_tick_format() {
        assert_eq!(TickFormat::Currency.format(50_000.0), "$50,000");
        assert_eq!(TickFormat::Currency.format(1250.5), "$1,250.5");
        assert_eq!(TickFormat::PercentSuffix.format(25.0), "25%");
        assert_eq!(TickFormat::PercentSuffix.format(7.5), "7.5%");
    }
}
