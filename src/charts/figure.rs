// src/charts/figure.rs

use serde::Serialize;
use serde_json::{json, Map, Value};

/// A Plotly figure: trace list plus layout, rendered client-side.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn new(title: &str) -> Self {
        Self {
            data: Vec::new(),
            layout: json!({
                "title": { "text": title },
                "margin": { "t": 60, "r": 20, "b": 60, "l": 60 },
                "font": { "family": "system-ui, sans-serif" },
            }),
        }
    }

    pub fn trace(mut self, trace: Value) -> Self {
        self.data.push(trace);
        self
    }

    pub fn traces<I: IntoIterator<Item = Value>>(mut self, traces: I) -> Self {
        self.data.extend(traces);
        self
    }

    /// Sets (or replaces) one top-level layout key.
    pub fn layout(mut self, key: &str, value: Value) -> Self {
        if let Value::Object(map) = &mut self.layout {
            map.insert(key.to_string(), value);
        } else {
            let mut map = Map::new();
            map.insert(key.to_string(), value);
            self.layout = Value::Object(map);
        }
        self
    }

    pub fn title(&self) -> &str {
        self.layout
            .pointer("/title/text")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub tooltip: String,
}

/// Circle markers over a tile layer, drawn with Leaflet.
#[derive(Debug, Clone, Serialize)]
pub struct PointMap {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

/// JSON safe to inline in a `<script>` element.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Colombian pesos without decimals, e.g. `$2,950`.
pub fn format_cop(value: f64) -> String {
    use num_format::{Locale, ToFormattedString};
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", (-rounded).to_formatted_string(&Locale::en))
    } else {
        format!("${}", rounded.to_formatted_string(&Locale::en))
    }
}
