use crate::dashboard::{Dashboard, Tab, TabContent};
use crate::errors::ServerError;
use crate::templates::components::{figure_panel, point_map_panel, tab_strip};
use crate::templates::layouts::desktop::dashboard_header;
use crate::templates::desktop_layout;
use maud::{html, Markup};

const PANEL_ID: &str = "tab-panel";

pub fn dashboard_page(dashboard: &Dashboard, selected: &Tab) -> Result<Markup, ServerError> {
    let panel = match &selected.content {
        TabContent::Chart(figure) => figure_panel(PANEL_ID, figure)?,
        TabContent::PointMap(map) => point_map_panel(PANEL_ID, map)?,
    };

    Ok(desktop_layout(
        "Dashboard GNCV",
        true,
        html! {
            (dashboard_header())
            (tab_strip(dashboard.tabs(), selected.slug))
            main class="container" {
                (panel)
                @for note in &selected.notes {
                    p class="notes" { (note) }
                }
            }
        },
    ))
}
