use maud::{html, Markup};

pub mod error;
pub mod figure;
pub mod tabs;

pub use error::html_error_response;
pub use figure::{figure_panel, point_map_panel};
pub use tabs::tab_strip;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
