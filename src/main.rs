use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::router::handle;
use astra::Server;
use log::{error, info};

mod charts;
mod config;
mod dashboard;
mod data;
mod errors;
mod geo;
mod responses;
mod router;
mod stats;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1️⃣ Load, aggregate and lay out everything once
    let cfg = DashboardConfig::from_env();
    let dashboard = Dashboard::build(&cfg);

    // 2️⃣ Start the server
    let addr = cfg.socket_addr();
    info!("Starting server at http://{addr}");

    let server = Server::bind(addr).max_workers(cfg.max_workers);

    // 3️⃣ Serve requests from the read-only dashboard
    let result = server.serve(move |req, _info| match handle(req, &dashboard) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        std::process::exit(1);
    }

    info!("Server shut down cleanly.");
}
