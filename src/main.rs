use std::env;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use opsboard::api::{HttpDataSource, TokenStore};
use opsboard::services::{DashboardService, DateRangeProvider, StaticRatioBreakdowns};

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base_url = env::var("OPSBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let tokens = TokenStore::new();
    if let Ok(token) = env::var("OPSBOARD_API_TOKEN") {
        tokens.set(token);
    }

    let source = HttpDataSource::new(base_url, tokens);
    let periods = Arc::new(DateRangeProvider::new());
    let service = Arc::new(DashboardService::new(
        Arc::new(source),
        Arc::new(StaticRatioBreakdowns),
        Arc::clone(&periods),
    ));
    let _period_listener = service.spawn_period_refresh();

    info!(period = %periods.selected_id(), "fetching dashboard");
    service.refresh().await;

    match service.snapshot() {
        Some(data) => println!("{}", serde_json::to_string_pretty(&data)?),
        None => println!("dashboard data not available yet"),
    }

    for (name, error) in [
        ("kpis", service.kpi_summary.error()),
        ("projects", service.projects.error()),
        ("resources", service.resources.error()),
        ("escalations", service.escalations.error()),
        ("financials", service.financials.error()),
    ] {
        if let Some(error) = error {
            eprintln!("warning: {name} fetch failed: {error}");
        }
    }

    Ok(())
}
