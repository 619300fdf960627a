use crate::dashboard::Dashboard;
use crate::errors::ServerError;
use crate::responses::{html_response, text_response, ResultResp};
use crate::templates::pages;
use astra::Request;
use std::collections::HashMap;

pub fn handle(req: Request, dashboard: &Dashboard) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => {
            if !dashboard.has_tabs() {
                return html_response(pages::diagnostic_page(dashboard.artifacts()));
            }

            let params = parse_query(&req);
            let selected = match params.get("tab") {
                Some(slug) => dashboard.tab(slug).ok_or(ServerError::NotFound)?,
                None => &dashboard.tabs()[0],
            };

            html_response(pages::dashboard_page(dashboard, selected)?)
        }
        ("GET", "/health") => text_response("ok"),
        (_, "/") | (_, "/health") => Err(ServerError::BadRequest(format!(
            "method {method} not allowed"
        ))),
        _ => Err(ServerError::NotFound),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(q) = req.uri().query() {
        for pair in q.split('&') {
            let mut parts = pair.splitn(2, '=');
            if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
                map.insert(k.to_string(), v.to_string());
            }
        }
    }

    map
}
