//! Chart.js backend
//!
//! Expects the Chart.js UMD bundle to be loaded on the page (`window.Chart`).

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::page::js_error;
use crate::chart::chartjs::{callback_paths, to_chartjs};
use crate::chart::{ChartBackend, ChartConfig, ChartHandle, TickFormat, TooltipFormat};
use crate::error::{DashboardError, Result};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(ctx: &CanvasRenderingContext2d, config: &JsValue) -> std::result::Result<JsChart, JsValue>;

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &JsChart);
}

type Formatter = Closure<dyn Fn(JsValue) -> JsValue>;

/// A Chart.js instance plus the formatter callbacks it calls into
pub struct ChartJsHandle {
    chart: JsChart,
    _callbacks: Vec<Formatter>,
}

impl ChartHandle for ChartJsHandle {
    fn destroy(self) {
        self.chart.destroy();
        // callbacks drop here, after the chart stopped using them
    }
}

pub struct ChartJsBackend {
    document: Document,
}

impl ChartJsBackend {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn context(&self, canvas_id: &str) -> Result<CanvasRenderingContext2d> {
        let canvas = self
            .document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| DashboardError::MissingElement(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DashboardError::Render(format!("#{canvas_id} is not a canvas")))?;

        canvas
            .get_context("2d")
            .map_err(|e| DashboardError::Render(js_error(&e)))?
            .ok_or_else(|| DashboardError::Render("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DashboardError::Render("unexpected context type".to_string()))
    }
}

impl ChartBackend for ChartJsBackend {
    type Handle = ChartJsHandle;

    fn draw(&self, container_id: &str, config: &ChartConfig) -> Result<ChartJsHandle> {
        let ctx = self.context(container_id)?;

        let js_config = js_sys::JSON::parse(&to_chartjs(config).to_string())
            .map_err(|e| DashboardError::Render(js_error(&e)))?;

        let mut callbacks = Vec::new();
        for (path, (key, formatter)) in callback_paths(config).into_iter().zip(formatters(config)) {
            let target = object_at(&js_config, path)?;
            Reflect::set(&target, &JsValue::from_str(key), formatter.as_ref())
                .map_err(|e| DashboardError::Render(js_error(&e)))?;
            callbacks.push(formatter);
        }

        let chart = JsChart::new(&ctx, &js_config).map_err(|e| DashboardError::Render(js_error(&e)))?;
        Ok(ChartJsHandle {
            chart,
            _callbacks: callbacks,
        })
    }
}

/// Callbacks in the order [`callback_paths`] lists their locations
fn formatters(config: &ChartConfig) -> Vec<(&'static str, Formatter)> {
    let mut out = vec![("label", tooltip_label(config.tooltip.clone()))];
    if let Some(ticks) = config.axes.as_ref().and_then(|axes| axes.value_ticks) {
        out.push(("callback", tick_label(ticks)));
    }
    out
}

fn tooltip_label(format: TooltipFormat) -> Formatter {
    Closure::wrap(Box::new(move |context: JsValue| {
        let field = |name: &str| Reflect::get(&context, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED);
        let label = field("label").as_string().unwrap_or_default();
        let value = field("raw").as_f64().unwrap_or(0.0);
        let index = field("dataIndex").as_f64().unwrap_or(0.0) as usize;

        match format.lines(&label, value, index).as_slice() {
            [single] => JsValue::from_str(single),
            lines => lines
                .iter()
                .map(|line| JsValue::from_str(line))
                .collect::<Array>()
                .into(),
        }
    }) as Box<dyn Fn(JsValue) -> JsValue>)
}

fn tick_label(format: TickFormat) -> Formatter {
    Closure::wrap(Box::new(move |value: JsValue| {
        JsValue::from_str(&format.format(value.as_f64().unwrap_or(0.0)))
    }) as Box<dyn Fn(JsValue) -> JsValue>)
}

/// Walk `path` from `root`, creating empty objects where missing
fn object_at(root: &JsValue, path: &[&str]) -> Result<JsValue> {
    let mut current = root.clone();
    for key in path {
        let key = JsValue::from_str(key);
        let mut next = Reflect::get(&current, &key).map_err(|e| DashboardError::Render(js_error(&e)))?;
        if next.is_undefined() || next.is_null() {
            next = Object::new().into();
            Reflect::set(&current, &key, &next).map_err(|e| DashboardError::Render(js_error(&e)))?;
        }
        current = next;
    }
    Ok(current)
}
