//! Bulk price update
//!
//! Collects edited prices from the holdings table and submits them as one
//! batch. On success the page reloads so the server's numbers are shown; on
//! any failure the page stays exactly as it was, minus the busy indicator.

use log::{error, info, warn};

use crate::client::PortfolioApi;
use crate::error::DashboardError;
use crate::page::{Page, SecurityRow};
use crate::types::PriceUpdate;

const NOTHING_TO_SUBMIT: &str = "No price updates to submit.";
const TRANSPORT_FAILURE: &str = "Error updating prices. See console for details.";

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No row qualified; no request was made
    NothingToSubmit,
    /// Server accepted the batch; page reload requested
    Accepted { count: usize },
    /// Server answered but refused the batch
    Rejected { message: String },
    /// Request or response failed
    Failed,
}

/// Rows with both an id and a non-empty price, in table order
pub fn collect_batch(rows: &[SecurityRow]) -> Vec<PriceUpdate> {
    rows.iter()
        .filter_map(|row| {
            let id = row.id.as_deref().filter(|id| !id.is_empty())?;
            let price = row.price.as_deref().filter(|price| !price.is_empty())?;
            Some(PriceUpdate {
                id: id.to_string(),
                current_price: price.to_string(),
            })
        })
        .collect()
}

/// Submit every qualifying row of the page
pub async fn submit<A, P>(api: &A, page: &P, spinner_id: &str) -> SubmitOutcome
where
    A: PortfolioApi,
    P: Page,
{
    let batch = collect_batch(&page.security_rows());
    if batch.is_empty() {
        page.alert(NOTHING_TO_SUBMIT);
        return SubmitOutcome::NothingToSubmit;
    }

    page.set_busy(spinner_id, true);
    info!("Submitting {} price updates", batch.len());

    match api.update_prices(&batch).await {
        Ok(response) if response.is_success() => {
            page.reload();
            SubmitOutcome::Accepted { count: batch.len() }
        }
        Ok(response) => {
            let message = response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());
            warn!("Price update rejected: {message}");
            page.alert(&format!("Error updating prices: {message}"));
            page.set_busy(spinner_id, false);
            SubmitOutcome::Rejected { message }
        }
        Err(DashboardError::Api { status, message }) => {
            warn!("Price update rejected with HTTP {status}: {message}");
            page.alert(&format!("Error updating prices: {message}"));
            page.set_busy(spinner_id, false);
            SubmitOutcome::Rejected { message }
        }
        Err(e) => {
            error!("Error updating prices: {e}");
            page.alert(TRANSPORT_FAILURE);
            page.set_busy(spinner_id, false);
            SubmitOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ids;
    use crate::testing::{FakeApi, MemoryPage};
    use crate::types::UpdatePricesResponse;

    fn editable_rows() -> Vec<SecurityRow> {
        vec![
            SecurityRow::new("1", "10"),
            SecurityRow::new("2", ""),
            SecurityRow::new("", "5"),
        ]
    }

    fn response(status: &str, message: Option<&str>) -> UpdatePricesResponse {
        UpdatePricesResponse {
            status: status.to_string(),
            message: message.map(ToString::to_string),
        }
    }

    #[test]
    fn test_collect_batch_skips_incomplete_rows() {
        let mut rows = editable_rows();
        rows.push(SecurityRow {
            id: Some("4".to_string()),
            price: None,
        });
        rows.push(SecurityRow {
            id: None,
            price: Some("7".to_string()),
        });

        assert_eq!(
            collect_batch(&rows),
            [PriceUpdate {
                id: "1".to_string(),
                current_price: "10".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_request() {
        let api = FakeApi::default();
        let page = MemoryPage::new().with_rows(vec![SecurityRow::new("2", "")]);

        let outcome = submit(&api, &page, ids::UPDATE_SPINNER).await;

        assert_eq!(outcome, SubmitOutcome::NothingToSubmit);
        assert!(api.request_log().is_empty());
        assert_eq!(*page.alerts.borrow(), ["No price updates to submit."]);
        assert!(page.busy_history().is_empty());
    }

    #[tokio::test]
    async fn test_success_reloads_page() {
        let api = FakeApi::default();
        let page = MemoryPage::new().with_rows(editable_rows());
        api.updates.push(Ok(response("success", None)));

        let outcome = submit(&api, &page, ids::UPDATE_SPINNER).await;

        assert_eq!(outcome, SubmitOutcome::Accepted { count: 1 });
        assert_eq!(
            *api.submitted.borrow(),
            [vec![PriceUpdate {
                id: "1".to_string(),
                current_price: "10".to_string()
            }]]
        );
        assert_eq!(page.reloads.get(), 1);
        assert!(page.alerts.borrow().is_empty());
        assert!(page.is_busy(ids::UPDATE_SPINNER));
    }

    #[tokio::test]
    async fn test_rejection_uses_server_message() {
        let api = FakeApi::default();
        let page = MemoryPage::new().with_rows(editable_rows());
        api.updates
            .push(Ok(response("error", Some("could not convert string to float"))));

        let outcome = submit(&api, &page, ids::UPDATE_SPINNER).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: "could not convert string to float".to_string()
            }
        );
        assert_eq!(
            *page.alerts.borrow(),
            ["Error updating prices: could not convert string to float"]
        );
        assert_eq!(page.reloads.get(), 0);
        assert_eq!(page.busy_history(), [true, false]);
    }

    #[tokio::test]
    async fn test_rejection_without_message() {
        let api = FakeApi::default();
        let page = MemoryPage::new().with_rows(editable_rows());
        api.updates.push(Ok(response("error", None)));

        submit(&api, &page, ids::UPDATE_SPINNER).await;

        assert_eq!(*page.alerts.borrow(), ["Error updating prices: Unknown error"]);
        assert!(!page.is_busy(ids::UPDATE_SPINNER));
    }

    #[tokio::test]
    async fn test_http_error_status_is_a_rejection() {
        let api = FakeApi::default();
        let page = MemoryPage::new().with_rows(editable_rows());
        api.updates.push(Err(DashboardError::Api {
            status: 500,
            message: "Unknown error".to_string(),
        }));

        let outcome = submit(&api, &page, ids::UPDATE_SPINNER).await;

        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        assert!(!page.is_busy(ids::UPDATE_SPINNER));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let api = FakeApi::default();
        let page = MemoryPage::new().with_rows(editable_rows());
        api.updates
            .push(Err(DashboardError::Http("network unreachable".to_string())));

        let outcome = submit(&api, &page, ids::UPDATE_SPINNER).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            *page.alerts.borrow(),
            ["Error updating prices. See console for details."]
        );
        assert_eq!(page.reloads.get(), 0);
        assert_eq!(page.busy_history(), [true, false]);
    }
}
