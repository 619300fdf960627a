// src/charts/maps.rs

use super::figure::{format_cop, Figure, Marker, PointMap};
use super::{colorscale, RD_BU, SUNSETDARK};
use crate::geo::{MapViews, RegionGeometry, DEPARTMENT_ATTR};
use geo::{LineString, MultiPolygon};
use serde_json::{json, Value};

/// Centre of Colombia, as the point map opens.
const MAP_CENTER: [f64; 2] = [4.57, -74.3];
const MAP_ZOOM: u8 = 6;

fn ring_coords(ring: &LineString<f64>) -> Value {
    Value::Array(ring.0.iter().map(|c| json!([c.x, c.y])).collect())
}

fn multipolygon_coords(mp: &MultiPolygon<f64>) -> Value {
    Value::Array(
        mp.0.iter()
            .map(|poly| {
                let mut rings = vec![ring_coords(poly.exterior())];
                rings.extend(poly.interiors().iter().map(ring_coords));
                Value::Array(rings)
            })
            .collect(),
    )
}

/// GeoJSON FeatureCollection keyed by `properties.DPTO_CNMBR`.
pub fn regions_geojson(regions: &[RegionGeometry]) -> Value {
    let features: Vec<Value> = regions
        .iter()
        .map(|r| {
            json!({
                "type": "Feature",
                "properties": { DEPARTMENT_ATTR: r.name },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": multipolygon_coords(&r.boundary),
                },
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

fn choropleth_layout(fig: Figure) -> Figure {
    fig.layout("geo", json!({ "fitbounds": "locations", "visible": false }))
        .layout("margin", json!({ "r": 0, "t": 50, "l": 0, "b": 0 }))
}

fn region_names(views: &MapViews) -> Vec<&str> {
    views.regions.iter().map(|r| r.name.as_str()).collect()
}

pub fn price_choropleth(views: &MapViews) -> Figure {
    let title = format!(
        "📍 Precios de GNCV por Departamento - {}",
        views.last_period.format("%B %Y")
    );

    choropleth_layout(Figure::new(&title).trace(json!({
        "type": "choropleth",
        "geojson": regions_geojson(&views.regions),
        "featureidkey": format!("properties.{DEPARTMENT_ATTR}"),
        "locations": region_names(views),
        "z": views.latest_prices,
        "colorscale": colorscale(&SUNSETDARK),
        "colorbar": { "title": { "text": "Precio Promedio (COP)" } },
        "hovertemplate": "%{location}<br>Precio Promedio (COP): %{z:,.0f}<extra></extra>",
    })))
}

pub fn variation_choropleth(views: &MapViews) -> Figure {
    let title = format!(
        "📊 Variación Porcentual del Precio de GNCV ({} - {})",
        views.first_period.format("%B %Y"),
        views.last_period.format("%B %Y")
    );
    let z: Vec<Option<f64>> = views
        .variations
        .iter()
        .map(|v| v.as_ref().and_then(|v| v.percent))
        .collect();

    let mut trace = json!({
        "type": "choropleth",
        "geojson": regions_geojson(&views.regions),
        "featureidkey": format!("properties.{DEPARTMENT_ATTR}"),
        "locations": region_names(views),
        "z": z,
        "colorscale": colorscale(&RD_BU),
        "colorbar": { "title": { "text": "Variación (%)" } },
        "hovertemplate": "%{location}<br>Variación: %{z:.2f}%<extra></extra>",
    });

    // A zero bound would collapse the scale; let Plotly pick one.
    if let (Some((lo, hi)), Value::Object(map)) = (views.color_range(), &mut trace) {
        if hi > 0.0 {
            map.insert("zmin".into(), json!(lo));
            map.insert("zmax".into(), json!(hi));
        }
    }

    choropleth_layout(Figure::new(&title).trace(trace))
}

pub fn municipality_point_map(views: &MapViews) -> PointMap {
    PointMap {
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        markers: views
            .points
            .iter()
            .map(|p| Marker {
                lat: p.latitude,
                lon: p.longitude,
                tooltip: format!(
                    "{} ({}): {}",
                    p.municipality,
                    p.department,
                    format_cop(p.price)
                ),
            })
            .collect(),
    }
}
