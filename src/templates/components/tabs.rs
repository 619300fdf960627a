use crate::dashboard::Tab;
use maud::{html, Markup};

pub fn tab_href(slug: &str) -> String {
    format!("/?tab={slug}")
}

pub fn tab_strip(tabs: &[Tab], selected: &str) -> Markup {
    html! {
        nav class="tabs" {
            @for tab in tabs {
                @let active = tab.slug == selected;
                a href=(tab_href(tab.slug))
                    class=[active.then_some("active")]
                    aria-current=[active.then_some("page")]
                {
                    (tab.label)
                }
            }
        }
    }
}
