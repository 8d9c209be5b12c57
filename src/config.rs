//! Configuration management for the dashboard

use log::LevelFilter;

use crate::error::{DashboardError, Result};

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Origin the API paths are resolved against (e.g. `https://example.com`)
    pub api_base: String,

    /// Log level
    pub log_level: String,

    /// Range requested on the first performance render (None = backend default)
    pub default_days: Option<u32>,
}

impl DashboardConfig {
    /// Load configuration through a key lookup.
    ///
    /// In the browser the lookup reads `data-*` attributes on `<body>`;
    /// `fallback_base` is the page origin.
    pub fn from_lookup<F>(lookup: F, fallback_base: &str) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_base: lookup("api-base")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| fallback_base.trim_end_matches('/').to_string()),

            log_level: lookup("log-level").unwrap_or_else(|| "info".to_string()),

            default_days: lookup("default-days")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|days| *days > 0),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.is_empty() {
            return Err(DashboardError::Config("api_base must not be empty".into()));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "api_base must be an http(s) origin, got {}",
                self.api_base
            )));
        }
        self.level_filter()?;
        Ok(())
    }

    /// Parsed log level
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| DashboardError::Config(format!("unknown log level: {}", self.log_level)))
    }
}
