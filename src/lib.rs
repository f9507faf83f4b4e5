//! Seasonal pricing engine and quote service for the Delventto apartment.
//!
//! The core (`calendar`, `pricing`) is synchronous and pure; `routes`
//! exposes it over HTTP with a shared [`AppState`].

pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use cache::AppCache;
use calendar::Calendar;
use config::AppConfig;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub calendar: Arc<Calendar>,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(config: AppConfig, calendar: Calendar) -> Self {
        Self {
            config: Arc::new(config),
            calendar: Arc::new(calendar),
            cache: AppCache::new(),
        }
    }
}
