//! In-memory caching using moka
//!
//! Memoises stay resolutions. A resolution depends only on the dates and the
//! calendar, which never changes while the process runs.

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::pricing::models::StayResolution;

/// `(check_in, check_out)`
pub type StayKey = (NaiveDate, NaiveDate);

/// Application cache holding resolved stays
#[derive(Clone)]
pub struct AppCache {
    pub stays: Cache<StayKey, Arc<StayResolution>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Stays: 1000 entries, 1 hour TTL, 15 min idle
            stays: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(60 * 60))
                .time_to_idle(Duration::from_secs(15 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            stays_size: self.stays.entry_count(),
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub stays_size: u64,
}
