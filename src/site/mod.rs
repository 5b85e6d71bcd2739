//! Public portfolio site
//!
//! Serves the published portfolios over HTTP, built with Axum. Only
//! `ACTIVE` records are shown, ordered by their order index.
//!
//! # Endpoints
//!
//! ## Portfolio
//! - `GET /:username` - Rendered portfolio page
//! - `GET /api/v1/portfolio/:username` - Visible portfolio as JSON
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use folio::api::ApiClient;
//! use folio::config::Config;
//! use folio::portfolio::PortfolioService;
//! use folio::site::{serve, SiteState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let client = ApiClient::new(&config.api)?;
//!     let state = SiteState::new(PortfolioService::new(client), config.site.clone());
//!     serve(state, &config.site).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use error::{SiteError, SiteResult};
pub use state::SiteState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SiteConfig;

/// CORS layer for the configured origins; permissive when none are set
fn cors_layer(config: &SiteConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Build the site router with all routes and middleware
pub fn build_router(state: SiteState) -> Router {
    let api_routes =
        Router::new().route("/portfolio/:username", get(routes::portfolio::json));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/:username", get(routes::portfolio::page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Start the site server
pub async fn serve(state: SiteState, config: &SiteConfig) -> Result<(), SiteError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Folio site listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SiteError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Folio site shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
