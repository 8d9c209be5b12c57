//! Chart.js configuration document
//!
//! Produces the JSON object passed to `new Chart(ctx, config)`. Callbacks
//! (tooltip labels, tick labels) cannot travel as JSON; the browser backend
//! attaches them afterwards at the paths listed by [`callback_paths`].

use serde_json::{Map, Value, json};

use super::{ChartConfig, ChartKind, Dataset, Legend};

const TITLE_FONT_SIZE: u32 = 16;

/// Build the Chart.js configuration for `config`
pub fn to_chartjs(config: &ChartConfig) -> Value {
    let mut options = json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "title": {
                "display": true,
                "text": config.title,
                "font": { "size": TITLE_FONT_SIZE },
            },
            "legend": legend(config.legend),
            "tooltip": {},
        },
    });

    if config.tooltip_index_mode {
        options["plugins"]["tooltip"] = json!({ "mode": "index", "intersect": false });
    }

    if let Some(axes) = &config.axes {
        let (value_axis, category_axis) = if axes.horizontal { ("x", "y") } else { ("y", "x") };
        if axes.horizontal {
            options["indexAxis"] = json!("y");
        }
        let mut scales = Map::new();
        scales.insert(
            value_axis.to_string(),
            json!({ "beginAtZero": axes.value_begin_at_zero }),
        );
        scales.insert(
            category_axis.to_string(),
            json!({ "grid": { "display": axes.category_grid } }),
        );
        options["scales"] = Value::Object(scales);
    } else if config.kind == ChartKind::PolarArea {
        options["scales"] = json!({ "r": { "display": config.radial_axis } });
    }

    json!({
        "type": config.kind,
        "data": {
            "labels": config.labels,
            "datasets": config.datasets.iter().map(|d| dataset(config.kind, d)).collect::<Vec<_>>(),
        },
        "options": options,
    })
}

/// Paths (from the config root) where formatter callbacks belong
pub fn callback_paths(config: &ChartConfig) -> Vec<&'static [&'static str]> {
    let mut paths: Vec<&'static [&'static str]> =
        vec![&["options", "plugins", "tooltip", "callbacks"]];
    if let Some(axes) = &config.axes {
        if axes.value_ticks.is_some() {
            paths.push(if axes.horizontal {
                &["options", "scales", "x", "ticks"]
            } else {
                &["options", "scales", "y", "ticks"]
            });
        }
    }
    paths
}

fn dataset(kind: ChartKind, d: &Dataset) -> Value {
    let mut out = json!({
        "data": d.data,
        "borderColor": d.border_color,
        "borderWidth": d.border_width,
    });
    if let Some(label) = &d.label {
        out["label"] = json!(label);
    }
    out["backgroundColor"] = match (kind, d.background.as_slice()) {
        (ChartKind::Line, [single]) => json!(single),
        (_, colors) => json!(colors),
    };
    if let Some(line) = &d.line {
        out["fill"] = json!(line.fill);
        out["tension"] = json!(line.tension);
        out["pointBackgroundColor"] = json!(line.point_color);
        out["pointBorderColor"] = json!("#fff");
        out["pointHoverBackgroundColor"] = json!("#fff");
        out["pointHoverBorderColor"] = json!(line.point_color);
    }
    out
}

fn legend(legend: Legend) -> Value {
    let placed = |position: &str, box_width: Option<u32>| {
        let mut out = json!({ "position": position });
        if let Some(width) = box_width {
            out["labels"] = json!({ "boxWidth": width });
        }
        out
    };
    match legend {
        Legend::Hidden => json!({ "display": false }),
        Legend::Bottom { box_width } => placed("bottom", box_width),
        Legend::Right { box_width } => placed("right", box_width),
    }
}
