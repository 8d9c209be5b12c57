//! Common types for the dashboard
//!
//! Wire payloads exchanged with the portfolio API plus the validated view
//! structures the widgets render. Everything here is created per request,
//! consumed by one render or submit, and dropped.

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::error::{DashboardError, Result};

/// `GET /api/portfolio_performance` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceResponse {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
}

/// `GET /api/asset_allocation` and `GET /api/sector_allocation` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationResponse {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// One entry of the `POST /api/update_prices` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub id: String,
    pub current_price: String,
}

/// `POST /api/update_prices` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePricesResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpdatePricesResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Index-aligned (date, value) series
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dates: Vec<String>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series, rejecting misaligned inputs
    pub fn new(dates: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(DashboardError::InvalidData(format!(
                "time series length mismatch: {} dates vs {} values",
                dates.len(),
                values.len()
            )));
        }
        Ok(Self { dates, values })
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl TryFrom<PerformanceResponse> for TimeSeries {
    type Error = DashboardError;

    fn try_from(response: PerformanceResponse) -> Result<Self> {
        Self::new(response.dates, response.values)
    }
}

/// Ordered (label, percentage) pairs
///
/// Percentages are shown as received; nothing checks that they sum to 100.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryDistribution {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl CategoryDistribution {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(DashboardError::InvalidData(format!(
                "allocation length mismatch: {} labels vs {} values",
                labels.len(),
                values.len()
            )));
        }
        Ok(Self { labels, values })
    }

    /// Keep only strictly positive entries, preserving order
    #[must_use]
    pub fn positive_only(self) -> Self {
        let (labels, values) = self
            .labels
            .into_iter()
            .zip(self.values)
            .filter(|(_, value)| *value > 0.0)
            .unzip();
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TryFrom<AllocationResponse> for CategoryDistribution {
    type Error = DashboardError;

    fn try_from(response: AllocationResponse) -> Result<Self> {
        Self::new(response.labels, response.data)
    }
}

/// Weight and risk score of one asset class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    /// Fraction of the portfolio in [0, 1]
    pub weight: f64,
    pub risk_score: f64,
}

/// Asset class -> risk entry, in the order the page lists them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskBreakdown {
    entries: Vec<(String, RiskEntry)>,
}

impl RiskBreakdown {
    /// Parse the JSON text embedded in the page
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .map(|(class, value)| Ok((class, serde_json::from_value::<RiskEntry>(value)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(String, RiskEntry)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Risk tier derived from a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskTier {
    /// Step function over the score; boundary values belong to the lower tier
    pub fn from_score(score: f64) -> Self {
        if score <= 2.0 {
            RiskTier::Low
        } else if score <= 4.0 {
            RiskTier::Medium
        } else if score <= 6.0 {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::VeryHigh => "very high",
        }
    }

    /// Segment color (green, yellow, orange, red)
    pub fn color(self) -> &'static str {
        match self {
            RiskTier::Low => "rgba(46, 204, 113, 0.8)",
            RiskTier::Medium => "rgba(241, 196, 15, 0.8)",
            RiskTier::High => "rgba(230, 126, 34, 0.8)",
            RiskTier::VeryHigh => "rgba(231, 76, 60, 0.8)",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
