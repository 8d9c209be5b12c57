//! Dashboard composition root
//!
//! Probes the page once for the optional widgets and controls, owns one
//! widget per chart container, and exposes the handlers the page's events
//! are routed to. Widgets never share state; each writes only its own
//! container.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};

use crate::chart::ChartBackend;
use crate::client::PortfolioApi;
use crate::config::DashboardConfig;
use crate::page::{Page, ids};
use crate::prices::{self, SubmitOutcome};
use crate::widgets::{AllocationChart, PerformanceChart, RenderOutcome, RiskChart, SectorChart};

const DELETE_PROMPT: &str = "Are you sure you want to delete this security?";

thread_local! {
    /// Dashboards pinned for the lifetime of the page
    static RETAINED: RefCell<Vec<Rc<dyn Any>>> = const { RefCell::new(Vec::new()) };
}

/// Optional parts of the page the dashboard can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    PerformanceChart,
    AssetAllocationChart,
    SectorAllocationChart,
    RiskBreakdownChart,
    PriceUpdate,
    PeriodSelector,
    DeleteConfirmation,
}

/// Which features this page carries
pub fn probe<P: Page>(page: &P) -> Vec<Feature> {
    let by_id = [
        (ids::PERFORMANCE_CHART, Feature::PerformanceChart),
        (ids::ASSET_ALLOCATION_CHART, Feature::AssetAllocationChart),
        (ids::SECTOR_ALLOCATION_CHART, Feature::SectorAllocationChart),
        (ids::RISK_BREAKDOWN_CHART, Feature::RiskBreakdownChart),
        (ids::UPDATE_PRICES_BUTTON, Feature::PriceUpdate),
        (ids::PERIOD_SELECTOR, Feature::PeriodSelector),
    ];

    let mut features: Vec<Feature> = by_id
        .into_iter()
        .filter(|(id, _)| page.has_element(id))
        .map(|(_, feature)| feature)
        .collect();

    if page.delete_button_count() > 0 {
        features.push(Feature::DeleteConfirmation);
    }
    features
}

/// Period selector value as a day count; anything but a positive integer
/// means the backend default
pub fn parse_period(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(days) if days > 0 => Some(days),
        _ => {
            warn!("Ignoring period selector value {raw:?}; using default range");
            None
        }
    }
}

/// What [`Dashboard::start`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    pub dates_filled: usize,
    pub tooltips: usize,
    pub performance: RenderOutcome,
    pub asset_allocation: RenderOutcome,
    pub sector_allocation: RenderOutcome,
    pub risk_breakdown: RenderOutcome,
}

/// Page-level coordinator
pub struct Dashboard<A, P, B: ChartBackend> {
    api: A,
    page: P,
    backend: B,
    config: DashboardConfig,
    features: Vec<Feature>,
    performance: PerformanceChart<B::Handle>,
    asset_allocation: AllocationChart<B::Handle>,
    sector_allocation: SectorChart<B::Handle>,
    risk_breakdown: RiskChart<B::Handle>,
}

impl<A, P, B> Dashboard<A, P, B>
where
    A: PortfolioApi,
    P: Page,
    B: ChartBackend,
{
    pub fn new(api: A, page: P, backend: B, config: DashboardConfig) -> Self {
        let features = probe(&page);
        debug!("Dashboard features: {features:?}");

        Self {
            api,
            page,
            backend,
            config,
            features,
            performance: PerformanceChart::new(ids::PERFORMANCE_CHART),
            asset_allocation: AllocationChart::new(ids::ASSET_ALLOCATION_CHART),
            sector_allocation: SectorChart::new(ids::SECTOR_ALLOCATION_CHART),
            risk_breakdown: RiskChart::new(ids::RISK_BREAKDOWN_CHART, ids::RISK_BREAKDOWN_DATA),
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Initialise the page as of today (UTC)
    pub async fn start(&self) -> StartReport {
        self.start_on(Utc::now().date_naive()).await
    }

    /// Fill date defaults, activate tooltips, then draw every chart present.
    /// Chart fetches run concurrently and fail independently.
    pub async fn start_on(&self, today: NaiveDate) -> StartReport {
        let dates_filled = self.page.default_empty_dates(today);
        let tooltips = self.page.activate_tooltips();

        let performance = async {
            if self.has(Feature::PerformanceChart) {
                self.performance
                    .render(&self.api, &self.page, &self.backend, self.config.default_days)
                    .await
            } else {
                RenderOutcome::Skipped
            }
        };
        let asset_allocation = async {
            if self.has(Feature::AssetAllocationChart) {
                self.asset_allocation
                    .render(&self.api, &self.page, &self.backend)
                    .await
            } else {
                RenderOutcome::Skipped
            }
        };
        let sector_allocation = async {
            if self.has(Feature::SectorAllocationChart) {
                self.sector_allocation
                    .render(&self.api, &self.page, &self.backend)
                    .await
            } else {
                RenderOutcome::Skipped
            }
        };

        let (performance, asset_allocation, sector_allocation) =
            futures::join!(performance, asset_allocation, sector_allocation);

        let risk_breakdown = if self.has(Feature::RiskBreakdownChart) {
            self.risk_breakdown.render(&self.page, &self.backend)
        } else {
            RenderOutcome::Skipped
        };

        let report = StartReport {
            dates_filled,
            tooltips,
            performance,
            asset_allocation,
            sector_allocation,
            risk_breakdown,
        };
        info!("Dashboard started: {report:?}");
        report
    }

    /// Period selector changed
    pub async fn on_period_change(&self, raw_value: &str) -> RenderOutcome {
        if !self.has(Feature::PerformanceChart) {
            return RenderOutcome::Skipped;
        }
        let days = parse_period(raw_value);
        self.performance
            .refresh(&self.api, &self.page, &self.backend, days)
            .await
    }

    /// Update-prices button clicked
    pub async fn on_update_prices(&self) -> SubmitOutcome {
        prices::submit(&self.api, &self.page, ids::UPDATE_SPINNER).await
    }

    /// Delete control activated; `false` means the action must be cancelled
    pub fn on_delete_requested(&self) -> bool {
        self.page.confirm(DELETE_PROMPT)
    }
}

impl<A, P, B> Dashboard<A, P, B>
where
    A: PortfolioApi + 'static,
    P: Page + 'static,
    B: ChartBackend + 'static,
{
    /// Pin the dashboard, and every chart it owns, until the page unloads
    pub fn retain_for_page(self: &Rc<Self>) {
        let pinned: Rc<dyn Any> = Rc::<Self>::clone(self);
        RETAINED.with(|retained| retained.borrow_mut().push(pinned));
    }
}
