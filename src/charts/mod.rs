mod figure;
mod maps;
mod statistics;

pub use figure::{script_json, Figure, PointMap};
pub use maps::{municipality_point_map, price_choropleth, variation_choropleth};
pub use statistics::statistics_figures;

use serde_json::{json, Value};

/// CARTO Sunsetdark, light to dark.
pub const SUNSETDARK: [&str; 7] = [
    "#fcde9c", "#faa476", "#f0746e", "#e34f6f", "#dc3977", "#b9257a", "#7c1d6f",
];

/// ColorBrewer RdBu: red for low values, blue for high.
pub const RD_BU: [&str; 11] = [
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de",
    "#4393c3", "#2166ac", "#053061",
];

pub const RD_BU_R: [&str; 11] = [
    "#053061", "#2166ac", "#4393c3", "#92c5de", "#d1e5f0", "#f7f7f7", "#fddbc7", "#f4a582",
    "#d6604d", "#b2182b", "#67001f",
];

/// Evenly spaced `[position, color]` stops for Plotly.
pub fn colorscale(colors: &[&str]) -> Value {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    Value::Array(
        colors
            .iter()
            .enumerate()
            .map(|(i, c)| json!([i as f64 / last, c]))
            .collect(),
    )
}
