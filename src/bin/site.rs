//! Folio public portfolio site
//!
//! Run with: cargo run --bin folio-site
//!
//! # Configuration
//!
//! Read from the usual config locations, then environment variables:
//! - `FOLIO_API_URL`: Portfolio REST API (default: http://localhost:8080/api/v1)
//! - `FOLIO_SITE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `FOLIO_SITE_PORT`: Port to listen on (default: 8084)
//! - `FOLIO_LOG_LEVEL` / `FOLIO_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use anyhow::Context;
use std::path::PathBuf;

use folio::api::ApiClient;
use folio::config::Config;
use folio::portfolio::PortfolioService;
use folio::site::{serve, SiteState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load_with_env(&PathBuf::from(path))?,
        None => Config::load_default()?,
    };

    folio::logging::init(&config.logging).context("Cannot initialise logging")?;

    tracing::info!("Starting Folio site v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Portfolio API: {}", config.api.base_url);

    let client = ApiClient::new(&config.api)?;
    match client.health_check().await {
        Ok(_) => tracing::info!("Portfolio API connection verified"),
        Err(e) => tracing::warn!("Portfolio API not available: {} (pages will fail until it is)", e),
    }

    let state = SiteState::new(PortfolioService::new(client), config.site.clone());

    tracing::info!("Starting server on {}", config.site.addr());
    serve(state, &config.site).await?;

    tracing::info!("Folio site stopped");
    Ok(())
}
