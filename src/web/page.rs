//! [`Page`] over the live DOM

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::NaiveDate;
use js_sys::{Array, Function, Reflect};
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, Window};

use crate::error::{DashboardError, Result};
use crate::page::{LOADING_HTML, Page, SecurityRow, error_notice_html, selectors};

/// Describe a thrown JS value for an error message
pub(crate) fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub struct WebPage {
    window: Window,
    document: Document,
    /// Parent of each chart canvas, looked up once; the canvas itself is
    /// replaced on every render
    hosts: RefCell<HashMap<String, Element>>,
}

impl WebPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            hosts: RefCell::new(HashMap::new()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn host(&self, container_id: &str) -> Result<Element> {
        if let Some(host) = self.hosts.borrow().get(container_id) {
            return Ok(host.clone());
        }
        let host = self
            .document
            .get_element_by_id(container_id)
            .and_then(|el| el.parent_element())
            .ok_or_else(|| DashboardError::MissingElement(container_id.to_string()))?;
        self.hosts
            .borrow_mut()
            .insert(container_id.to_string(), host.clone());
        Ok(host)
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            warn!("Bad selector {selector}");
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn tooltip_constructor(&self) -> Option<Function> {
        let bootstrap = Reflect::get(&self.window, &JsValue::from_str("bootstrap")).ok()?;
        if bootstrap.is_undefined() {
            return None;
        }
        Reflect::get(&bootstrap, &JsValue::from_str("Tooltip"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl Page for WebPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .map(|el| el.text_content().unwrap_or_default())
    }

    fn show_loading(&self, container_id: &str) -> Result<()> {
        self.host(container_id)?.set_inner_html(LOADING_HTML);
        Ok(())
    }

    fn show_error(&self, container_id: &str, message: &str) -> Result<()> {
        self.host(container_id)?
            .set_inner_html(&error_notice_html(message));
        Ok(())
    }

    fn prepare_canvas(&self, container_id: &str) -> Result<()> {
        self.host(container_id)?
            .set_inner_html(&format!(r#"<canvas id="{container_id}"></canvas>"#));
        Ok(())
    }

    fn security_rows(&self) -> Vec<SecurityRow> {
        self.select_all(selectors::SECURITY_ROW)
            .into_iter()
            .map(|row| SecurityRow {
                id: row.get_attribute("data-id"),
                price: row
                    .query_selector(selectors::PRICE_INPUT)
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value()),
            })
            .collect()
    }

    fn delete_button_count(&self) -> usize {
        self.select_all(selectors::DELETE_BUTTON).len()
    }

    fn set_busy(&self, indicator_id: &str, busy: bool) {
        let Some(indicator) = self.document.get_element_by_id(indicator_id) else {
            return;
        };
        if let Err(e) = indicator.class_list().toggle_with_force("d-none", !busy) {
            warn!("Cannot toggle #{indicator_id}: {}", js_error(&e));
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            warn!("alert() failed: {}", js_error(&e));
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn reload(&self) {
        if let Err(e) = self.window.location().reload() {
            warn!("Reload failed: {}", js_error(&e));
        }
    }

    fn default_empty_dates(&self, today: NaiveDate) -> usize {
        let today = today.format("%Y-%m-%d").to_string();
        let mut filled = 0;
        for input in self
            .select_all(selectors::DATE_INPUT)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            if input.value().is_empty() {
                input.set_value(&today);
                filled += 1;
            }
        }
        filled
    }

    fn activate_tooltips(&self) -> usize {
        let triggers = self.select_all(selectors::TOOLTIP_TRIGGER);
        if triggers.is_empty() {
            return 0;
        }
        let Some(tooltip) = self.tooltip_constructor() else {
            debug!("Bootstrap not loaded; {} tooltips left inactive", triggers.len());
            return 0;
        };
        triggers
            .iter()
            .filter(|el| Reflect::construct(&tooltip, &Array::of1(el)).is_ok())
            .count()
    }
}
