//! Chart widgets
//!
//! Each widget owns one container and the chart drawn in it. A render always
//! ends in one of two states: a freshly drawn chart, or the container showing
//! an inline error notice with no chart attached.
//!
//! # Architecture
//! - `performance.rs`: portfolio value line chart with period refresh
//! - `allocation.rs`: asset-class doughnut
//! - `sector.rs`: sector bars, zero-weight sectors dropped
//! - `risk.rs`: polar-area chart from data embedded in the page

mod allocation;
mod performance;
mod risk;
mod sector;

use std::cell::RefCell;

use log::error;

use crate::chart::{ChartBackend, ChartConfig, ChartSlot};
use crate::error::Result;
use crate::page::Page;

pub use allocation::{AllocationChart, allocation_config};
pub use performance::{PerformanceChart, performance_config};
pub use risk::{RiskChart, risk_config};
pub use sector::{SectorChart, sector_config};

/// How a render attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Chart drawn
    Drawn,
    /// Error notice shown instead
    Failed,
    /// Nothing to render from; page left untouched
    Skipped,
}

/// Draw `config` into the container, or show the error notice for `subject`.
///
/// Whatever chart the slot held is destroyed first in both cases.
pub(crate) fn present<P, B>(
    page: &P,
    backend: &B,
    slot: &RefCell<ChartSlot<B::Handle>>,
    container_id: &str,
    config: Result<ChartConfig>,
    subject: &str,
) -> RenderOutcome
where
    P: Page,
    B: ChartBackend,
{
    slot.borrow_mut().clear();

    let drawn = config.and_then(|config| {
        page.prepare_canvas(container_id)?;
        backend.draw(container_id, &config)
    });

    match drawn {
        Ok(handle) => {
            slot.borrow_mut().install(handle);
            RenderOutcome::Drawn
        }
        Err(e) => {
            error!("Error loading {subject}: {e}");
            if let Err(e) = page.show_error(container_id, &format!("Failed to load {subject}")) {
                error!("Cannot show {subject} error notice: {e}");
            }
            RenderOutcome::Failed
        }
    }
}
