//! Test doubles for the API, page and chart backend

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use chrono::NaiveDate;

use crate::chart::{ChartBackend, ChartConfig, ChartHandle};
use crate::client::PortfolioApi;
use crate::error::{DashboardError, Result};
use crate::page::{LOADING_HTML, Page, SecurityRow, error_notice_html};
use crate::types::{AllocationResponse, PerformanceResponse, PriceUpdate, UpdatePricesResponse};

/// Queue of canned results handed out in order
pub struct Script<T> {
    queue: RefCell<VecDeque<Result<T>>>,
}

impl<T> Script<T> {
    pub fn push(&self, outcome: Result<T>) {
        self.queue.borrow_mut().push_back(outcome);
    }

    fn next(&self, what: &str) -> Result<T> {
        self.queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(DashboardError::Http(format!("no scripted {what} response"))))
    }
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }
}

/// Scripted backend that records every request
#[derive(Default)]
pub struct FakeApi {
    pub performance: Script<PerformanceResponse>,
    pub assets: Script<AllocationResponse>,
    pub sectors: Script<AllocationResponse>,
    pub updates: Script<UpdatePricesResponse>,
    pub requests: RefCell<Vec<String>>,
    pub submitted: RefCell<Vec<Vec<PriceUpdate>>>,
}

impl FakeApi {
    pub fn performance(dates: &[&str], values: &[f64]) -> Result<PerformanceResponse> {
        Ok(PerformanceResponse {
            dates: dates.iter().map(ToString::to_string).collect(),
            values: values.to_vec(),
        })
    }

    pub fn allocation(labels: &[&str], data: &[f64]) -> Result<AllocationResponse> {
        Ok(AllocationResponse {
            labels: labels.iter().map(ToString::to_string).collect(),
            data: data.to_vec(),
        })
    }

    pub fn request_log(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl PortfolioApi for FakeApi {
    async fn portfolio_performance(&self, days: Option<u32>) -> Result<PerformanceResponse> {
        self.requests.borrow_mut().push(match days {
            Some(days) => format!("GET /api/portfolio_performance?days={days}"),
            None => "GET /api/portfolio_performance".to_string(),
        });
        self.performance.next("performance")
    }

    async fn asset_allocation(&self) -> Result<AllocationResponse> {
        self.requests
            .borrow_mut()
            .push("GET /api/asset_allocation".to_string());
        self.assets.next("asset allocation")
    }

    async fn sector_allocation(&self) -> Result<AllocationResponse> {
        self.requests
            .borrow_mut()
            .push("GET /api/sector_allocation".to_string());
        self.sectors.next("sector allocation")
    }

    async fn update_prices(&self, updates: &[PriceUpdate]) -> Result<UpdatePricesResponse> {
        self.requests
            .borrow_mut()
            .push("POST /api/update_prices".to_string());
        self.submitted.borrow_mut().push(updates.to_vec());
        self.updates.next("update")
    }
}

/// What an element currently holds
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Canvas,
    Html(String),
    Text(String),
    Empty,
}

/// In-memory page
#[derive(Default)]
pub struct MemoryPage {
    elements: RefCell<HashMap<String, Content>>,
    rows: Vec<SecurityRow>,
    delete_buttons: usize,
    tooltip_triggers: usize,
    confirm_answer: Cell<bool>,
    date_inputs: RefCell<Vec<String>>,
    busy: RefCell<HashMap<String, bool>>,
    busy_history: RefCell<Vec<bool>>,
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
    pub reloads: Cell<u32>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(self, id: &str) -> Self {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), Content::Canvas);
        self
    }

    pub fn with_element(self, id: &str) -> Self {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), Content::Empty);
        self
    }

    pub fn with_text(self, id: &str, text: &str) -> Self {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), Content::Text(text.to_string()));
        self
    }

    pub fn with_rows(mut self, rows: Vec<SecurityRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_delete_buttons(mut self, count: usize) -> Self {
        self.delete_buttons = count;
        self
    }

    pub fn with_tooltip_triggers(mut self, count: usize) -> Self {
        self.tooltip_triggers = count;
        self
    }

    pub fn with_date_inputs(self, values: &[&str]) -> Self {
        *self.date_inputs.borrow_mut() = values.iter().map(ToString::to_string).collect();
        self
    }

    pub fn answering_confirm(self, answer: bool) -> Self {
        self.confirm_answer.set(answer);
        self
    }

    pub fn content(&self, id: &str) -> Option<Content> {
        self.elements.borrow().get(id).cloned()
    }

    pub fn date_values(&self) -> Vec<String> {
        self.date_inputs.borrow().clone()
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.borrow().get(id).copied().unwrap_or(false)
    }

    /// Every busy/idle transition, in order
    pub fn busy_history(&self) -> Vec<bool> {
        self.busy_history.borrow().clone()
    }

    fn replace(&self, id: &str, content: Content) -> Result<()> {
        match self.elements.borrow_mut().get_mut(id) {
            Some(slot) => {
                *slot = content;
                Ok(())
            }
            None => Err(DashboardError::MissingElement(id.to_string())),
        }
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|c| match c {
            Content::Text(text) | Content::Html(text) => text.clone(),
            Content::Canvas | Content::Empty => String::new(),
        })
    }

    fn show_loading(&self, container_id: &str) -> Result<()> {
        self.replace(container_id, Content::Html(LOADING_HTML.to_string()))
    }

    fn show_error(&self, container_id: &str, message: &str) -> Result<()> {
        self.replace(container_id, Content::Html(error_notice_html(message)))
    }

    fn prepare_canvas(&self, container_id: &str) -> Result<()> {
        self.replace(container_id, Content::Canvas)
    }

    fn security_rows(&self) -> Vec<SecurityRow> {
        self.rows.clone()
    }

    fn delete_button_count(&self) -> usize {
        self.delete_buttons
    }

    fn set_busy(&self, indicator_id: &str, busy: bool) {
        self.busy.borrow_mut().insert(indicator_id.to_string(), busy);
        self.busy_history.borrow_mut().push(busy);
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn default_empty_dates(&self, today: NaiveDate) -> usize {
        let mut filled = 0;
        for value in self.date_inputs.borrow_mut().iter_mut() {
            if value.is_empty() {
                *value = today.format("%Y-%m-%d").to_string();
                filled += 1;
            }
        }
        filled
    }

    fn activate_tooltips(&self) -> usize {
        self.tooltip_triggers
    }
}

/// Chart backend that records draws and tracks live charts per container
#[derive(Default)]
pub struct RecordingBackend {
    pub draws: RefCell<Vec<(String, ChartConfig)>>,
    live: Rc<RefCell<HashMap<String, i32>>>,
    fail_next: Cell<bool>,
}

pub struct RecordedChart {
    container_id: String,
    live: Rc<RefCell<HashMap<String, i32>>>,
}

impl ChartHandle for RecordedChart {
    fn destroy(self) {
        *self.live.borrow_mut().entry(self.container_id).or_default() -= 1;
    }
}

impl RecordingBackend {
    /// Charts currently alive in a container
    pub fn live_in(&self, container_id: &str) -> i32 {
        self.live.borrow().get(container_id).copied().unwrap_or(0)
    }

    pub fn last_draw(&self) -> Option<(String, ChartConfig)> {
        self.draws.borrow().last().cloned()
    }

    pub fn draw_count(&self) -> usize {
        self.draws.borrow().len()
    }

    pub fn fail_next_draw(&self) {
        self.fail_next.set(true);
    }
}

impl ChartBackend for RecordingBackend {
    type Handle = RecordedChart;

    fn draw(&self, container_id: &str, config: &ChartConfig) -> Result<RecordedChart> {
        if self.fail_next.replace(false) {
            return Err(DashboardError::Render("canvas context unavailable".to_string()));
        }
        self.draws
            .borrow_mut()
            .push((container_id.to_string(), config.clone()));
        *self
            .live
            .borrow_mut()
            .entry(container_id.to_string())
            .or_default() += 1;
        Ok(RecordedChart {
            container_id: container_id.to_string(),
            live: self.live.clone(),
        })
    }
}
