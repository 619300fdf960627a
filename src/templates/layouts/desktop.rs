use crate::dashboard::TITLE;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
header { text-align: center; padding: 1rem 1rem 0; }
header p.subtitle { font-style: italic; color: #555; }
nav.tabs { display: flex; flex-wrap: wrap; gap: 0.25rem; border-bottom: 1px solid #d6d6d6; padding: 0 1rem; }
nav.tabs a { padding: 0.6rem 1rem; text-decoration: none; color: #333; border: 1px solid transparent; border-bottom: none; border-radius: 6px 6px 0 0; }
nav.tabs a.active { border-color: #d6d6d6; background: #fff; font-weight: 600; margin-bottom: -1px; }
main.container { padding: 1rem; }
.figure { width: 100%; min-height: 600px; }
.point-map { width: 100%; height: 500px; }
.notes { color: #8a4b00; }
.card { max-width: 720px; margin: 1rem auto; padding: 1rem 1.5rem; border: 1px solid #e2e2e2; border-radius: 8px; }
.status-ok { color: #15803d; }
.status-failed { color: #b91c1c; }
h1.error { color: red; text-align: center; }
"#;

/// Page shell. Chart runtimes are only pulled in when the page needs them.
pub fn desktop_layout(title: &str, with_charts: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
                @if with_charts {
                    link rel="stylesheet" href=(LEAFLET_CSS);
                    script src=(LEAFLET_JS) {}
                    script src=(PLOTLY_JS) charset="utf-8" {}
                }
            }
            body {
                (content)
            }
        }
    }
}

pub fn dashboard_header() -> Markup {
    html! {
        header {
            h1 { (TITLE) }
            p class="subtitle" {
                "Dashboard completo que combina análisis geoespacial y estadístico de precios de GNCV"
            }
        }
    }
}
