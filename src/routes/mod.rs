//! HTTP routing

pub mod calendar;
pub mod health;

use axum::{routing::get, Router};

use crate::error::AppError;
use crate::pricing;
use crate::AppState;

/// Build the application router with every endpoint mounted
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/cache/stats", get(health::cache_stats))
        .route("/api/calendar/day/:date", get(calendar::day))
        .route("/api/calendar/holidays/:year", get(calendar::holidays))
        .route("/api/calendar/stay", get(calendar::stay))
        .merge(pricing::router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
