//! Admin Sales Chart
//!
//! Draws the dashboard bar chart with Chart.js when its canvas is present.
//! The series is fixed sample data.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::error::describe_js;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(anchor: &Element, config: &JsValue) -> Result<JsChart, JsValue>;
}

// ========================
// Chart.js Config
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<u32>,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

/// Monthly sales sample shown on the dashboard
pub fn sales_chart_config() -> ChartConfig {
    ChartConfig {
        kind: "bar",
        data: ChartData {
            labels: vec!["January", "February", "March", "April", "May", "June"],
            datasets: vec![Dataset {
                label: "Sales",
                data: vec![12, 19, 3, 5, 2, 3],
                background_color: "rgba(54, 162, 235, 0.2)",
                border_color: "rgba(54, 162, 235, 1)",
                border_width: 1,
            }],
        },
        options: ChartOptions {
            scales: Scales {
                y: Axis { begin_at_zero: true },
            },
        },
    }
}

// ========================
// Rendering
// ========================

/// Charting library seam
pub trait ChartBackend {
    type Anchor;
    type Error;

    fn render(&self, anchor: &Self::Anchor, config: &ChartConfig) -> Result<(), Self::Error>;
}

/// Global `Chart` from Chart.js
pub struct ChartJs;

impl ChartBackend for ChartJs {
    type Anchor = Element;
    type Error = String;

    fn render(&self, anchor: &Element, config: &ChartConfig) -> Result<(), String> {
        let js_config = serde_wasm_bindgen::to_value(config).map_err(|e| e.to_string())?;
        JsChart::new(anchor, &js_config).map(|_| ()).map_err(|e| describe_js(&e))
    }
}

/// Render the sales chart if `anchor` exists. Returns whether it was drawn.
pub fn render_if_present<B: ChartBackend>(backend: &B, anchor: Option<B::Anchor>) -> Result<bool, B::Error> {
    match anchor {
        Some(anchor) => backend.render(&anchor, &sales_chart_config()).map(|_| true),
        None => Ok(false),
    }
}

/// Draw the dashboard chart under its configured anchor, if any
pub fn render_admin_chart(root: &Element, selector: &str) {
    let anchor = root.query_selector(selector).ok().flatten();
    if let Err(e) = render_if_present(&ChartJs, anchor) {
        web_sys::console::error_1(&format!("[CHART] Could not render sales chart: {}", e).into());
    }
}
