//! Portfolio API client
//!
//! Implements the backend contract used by the dashboard:
//! - Performance time series
//! - Asset and sector allocation
//! - Bulk price update
//!
//! One attempt per call; no retries, no timeouts beyond what the transport
//! itself reports.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::types::{AllocationResponse, PerformanceResponse, PriceUpdate, UpdatePricesResponse};

const PERFORMANCE_PATH: &str = "/api/portfolio_performance";
const ASSET_ALLOCATION_PATH: &str = "/api/asset_allocation";
const SECTOR_ALLOCATION_PATH: &str = "/api/sector_allocation";
const UPDATE_PRICES_PATH: &str = "/api/update_prices";

/// Backend operations the widgets depend on
#[allow(async_fn_in_trait)] // single-threaded browser futures, never sent across threads
pub trait PortfolioApi {
    /// Portfolio value history; `None` asks for the backend's default range
    async fn portfolio_performance(&self, days: Option<u32>) -> Result<PerformanceResponse>;

    async fn asset_allocation(&self) -> Result<AllocationResponse>;

    async fn sector_allocation(&self) -> Result<AllocationResponse>;

    /// Submit the whole batch in one request
    async fn update_prices(&self, updates: &[PriceUpdate]) -> Result<UpdatePricesResponse>;
}

/// HTTP client for the portfolio API
pub struct PortfolioClient {
    base_url: String,
    http: reqwest::Client,
}

/// Error body the backend may send with a failed request
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl PortfolioClient {
    /// Create new client for an API origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    /// Performance endpoint path, with the range when one is given
    pub fn performance_path(days: Option<u32>) -> String {
        match days {
            Some(days) => format!("{PERFORMANCE_PATH}?days={days}"),
            None => PERFORMANCE_PATH.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Perform GET request
    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Perform POST request with a JSON body
    async fn post<T: for<'de> Deserialize<'de>, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response, checking for errors
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP {status} body: {body}");
            return Err(DashboardError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(DashboardError::from)
    }
}

impl PortfolioApi for PortfolioClient {
    async fn portfolio_performance(&self, days: Option<u32>) -> Result<PerformanceResponse> {
        self.get(&Self::performance_path(days)).await
    }

    async fn asset_allocation(&self) -> Result<AllocationResponse> {
        self.get(ASSET_ALLOCATION_PATH).await
    }

    async fn sector_allocation(&self) -> Result<AllocationResponse> {
        self.get(SECTOR_ALLOCATION_PATH).await
    }

    async fn update_prices(&self, updates: &[PriceUpdate]) -> Result<UpdatePricesResponse> {
        self.post(UPDATE_PRICES_PATH, updates).await
    }
}

/// Server-supplied message of an error body, or a generic one
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "Unknown error".to_string())
}
