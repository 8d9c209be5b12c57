//! Error types for the dashboard
//!
//! Uses thiserror for ergonomic error definitions.
//! Widgets catch these at their boundary and turn them into inline notices,
//! so nothing here ever reaches an unhandled rejection.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failures (DNS, connection, browser fetch rejection)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Backend answered with a non-success status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing errors (API payloads and embedded page data)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload parsed but violates the data contract
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Expected DOM element is not on the page
    #[error("Element not found: #{0}")]
    MissingElement(String),

    /// Chart backend failed to draw
    #[error("Render error: {0}")]
    Render(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}
