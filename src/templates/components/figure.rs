use crate::charts::{script_json, Figure, PointMap};
use crate::errors::ServerError;
use maud::{html, Markup, PreEscaped};

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ServerError> {
    script_json(value).map_err(|e| ServerError::RenderError(format!("figure json: {e}")))
}

pub fn figure_panel(id: &str, figure: &Figure) -> Result<Markup, ServerError> {
    let data = to_json(&figure.data)?;
    let layout = to_json(&figure.layout)?;
    let script = format!(
        "Plotly.newPlot({id:?}, {data}, {layout}, {{\"responsive\": true}});"
    );

    Ok(html! {
        div id=(id) class="figure" role="img" aria-label=(figure.title()) {}
        script { (PreEscaped(script)) }
    })
}

pub fn point_map_panel(id: &str, map: &PointMap) -> Result<Markup, ServerError> {
    let center = to_json(&map.center)?;
    let markers = to_json(&map.markers)?;
    let script = format!(
        r#"(function () {{
  var map = L.map({id:?}).setView({center}, {zoom});
  L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
    attribution: "&copy; OpenStreetMap contributors"
  }}).addTo(map);
  var group = L.layerGroup().addTo(map);
  {markers}.forEach(function (m) {{
    L.circleMarker([m.lat, m.lon], {{
      radius: 5, color: "black", fillColor: "orange", fillOpacity: 0.8
    }}).bindTooltip(m.tooltip).addTo(group);
  }});
}})();"#,
        zoom = map.zoom
    );

    Ok(html! {
        div style="padding: 1rem" {
            div id=(id) class="point-map" {}
        }
        script { (PreEscaped(script)) }
    })
}
