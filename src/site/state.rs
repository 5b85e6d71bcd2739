//! Site State
//!
//! Shared state accessible by all site handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::SiteConfig;
use crate::portfolio::PortfolioSource;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct SiteState {
    /// Where portfolios are fetched from
    pub portfolios: Arc<dyn PortfolioSource>,
    /// Site configuration
    pub config: Arc<SiteConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl SiteState {
    pub fn new(portfolios: impl PortfolioSource + 'static, config: SiteConfig) -> Self {
        Self {
            portfolios: Arc::new(portfolios),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
