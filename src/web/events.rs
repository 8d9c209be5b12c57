//! DOM event wiring
//!
//! Listeners live for the lifetime of the page, so their closures are leaked
//! with `forget()`.

use std::rc::Rc;

use js_sys::Reflect;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget};

use super::WebDashboard;
use super::page::js_error;
use crate::dashboard::Feature;
use crate::page::{ids, selectors};

/// Attach every handler the page has a target for
pub fn wire(dashboard: &Rc<WebDashboard>) {
    let document = dashboard.page().document().clone();

    if dashboard.has(Feature::PriceUpdate) {
        if let Some(button) = document.get_element_by_id(ids::UPDATE_PRICES_BUTTON) {
            let dashboard = Rc::clone(dashboard);
            listen(&button, "click", move |_event| {
                let dashboard = Rc::clone(&dashboard);
                spawn_local(async move {
                    dashboard.on_update_prices().await;
                });
            });
        }
    }

    if dashboard.has(Feature::DeleteConfirmation) {
        if let Ok(buttons) = document.query_selector_all(selectors::DELETE_BUTTON) {
            for button in (0..buttons.length()).filter_map(|i| buttons.item(i)) {
                let dashboard = Rc::clone(dashboard);
                listen(&button, "click", move |event| {
                    if !dashboard.on_delete_requested() {
                        event.prevent_default();
                    }
                });
            }
        }
    }

    if dashboard.has(Feature::PeriodSelector) {
        if let Some(selector) = document.get_element_by_id(ids::PERIOD_SELECTOR) {
            let dashboard = Rc::clone(dashboard);
            listen(&selector, "change", move |event| {
                let value = event
                    .current_target()
                    .and_then(|target| {
                        Reflect::get(&target, &JsValue::from_str("value")).ok()
                    })
                    .and_then(|value| value.as_string())
                    .unwrap_or_default();
                let dashboard = Rc::clone(&dashboard);
                spawn_local(async move {
                    dashboard.on_period_change(&value).await;
                });
            });
        }
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: Fn(Event) + 'static,
{
    let closure = Closure::<dyn Fn(Event)>::wrap(Box::new(handler));
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        warn!("Cannot listen for {event}: {}", js_error(&e));
    }
    closure.forget();
}
