//! Page contract
//!
//! The element ids, classes and interactions the dashboard relies on, behind
//! the [`Page`] trait so the widgets run the same against the browser DOM and
//! against an in-memory page in tests.

use chrono::NaiveDate;

use crate::error::Result;

/// Element ids the dashboard looks for
pub mod ids {
    pub const PERFORMANCE_CHART: &str = "performanceChart";
    pub const ASSET_ALLOCATION_CHART: &str = "assetAllocationChart";
    pub const SECTOR_ALLOCATION_CHART: &str = "sectorAllocationChart";
    pub const RISK_BREAKDOWN_CHART: &str = "riskBreakdownChart";
    pub const RISK_BREAKDOWN_DATA: &str = "riskBreakdownData";
    pub const UPDATE_PRICES_BUTTON: &str = "updatePricesBtn";
    pub const UPDATE_SPINNER: &str = "updateSpinner";
    pub const PERIOD_SELECTOR: &str = "periodSelector";
}

/// Class/selector names the dashboard looks for
pub mod selectors {
    pub const SECURITY_ROW: &str = "tr.security-row";
    pub const PRICE_INPUT: &str = ".current-price-input";
    pub const DELETE_BUTTON: &str = ".delete-security-btn";
    pub const DATE_INPUT: &str = r#"input[type="date"]"#;
    pub const TOOLTIP_TRIGGER: &str = r#"[data-bs-toggle="tooltip"]"#;
}

/// Markup shown while a chart is being rebuilt
pub const LOADING_HTML: &str = r#"<div class="text-center py-5"><div class="spinner-border text-primary" role="status"><span class="visually-hidden">Loading...</span></div></div>"#;

/// Inline error notice replacing a failed widget
pub fn error_notice_html(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger">{}</div>"#,
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An editable row of the holdings table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityRow {
    /// `data-id` of the row
    pub id: Option<String>,
    /// Value of the row's price input, if the row has one
    pub price: Option<String>,
}

impl SecurityRow {
    pub fn new(id: &str, price: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            price: Some(price.to_string()),
        }
    }
}

/// DOM operations used by the widgets and the bootstrap
pub trait Page {
    /// Whether an element with this id exists
    fn has_element(&self, id: &str) -> bool;

    /// Text content of the element, `None` when it is missing
    fn text_content(&self, id: &str) -> Option<String>;

    /// Replace a chart container with the loading placeholder
    fn show_loading(&self, container_id: &str) -> Result<()>;

    /// Replace a chart container with an inline error notice
    fn show_error(&self, container_id: &str, message: &str) -> Result<()>;

    /// Put a fresh, empty canvas where the chart container was
    fn prepare_canvas(&self, container_id: &str) -> Result<()>;

    /// Every row marked as a security row, in table order
    fn security_rows(&self) -> Vec<SecurityRow>;

    /// Number of elements asking for a delete confirmation
    fn delete_button_count(&self) -> usize;

    /// Show or hide a busy indicator
    fn set_busy(&self, indicator_id: &str, busy: bool);

    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;

    /// Reload the current view from the server
    fn reload(&self);

    /// Set every empty date input to `today`; returns how many were filled
    fn default_empty_dates(&self, today: NaiveDate) -> usize;

    /// Activate tooltip triggers; returns how many were activated
    fn activate_tooltips(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_is_escaped() {
        assert_eq!(
            error_notice_html("Failed to load performance data"),
            r#"<div class="alert alert-danger">Failed to load performance data</div>"#
        );
        assert_eq!(
            error_notice_html("<script>"),
            r#"<div class="alert alert-danger">&lt;script&gt;</div>"#
        );
    }
}
