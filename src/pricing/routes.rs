//! Pricing route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::{SeasonQuoteRequest, StayQuoteRequest};
use super::responses::{QuoteResponse, RatesResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/rates", get(rates))
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/quote/season", post(quote_season))
}

/// Default rates and fees
async fn rates(State(state): State<AppState>) -> Json<RatesResponse> {
    Json(RatesResponse::new(
        &state.config.pricing,
        state.calendar.seasons.coverage_end(),
    ))
}

/// Quote a stay by check-in and check-out dates
async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<StayQuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let pricing = &state.config.pricing;
    let inputs = request.pricing_inputs(pricing)?;

    let quote = services::quote_dated_stay(
        &state.cache,
        &state.calendar,
        pricing,
        request.check_in,
        request.check_out,
        &inputs,
        &request.meta(pricing),
    )
    .await?;

    Ok(Json(QuoteResponse::new(quote)))
}

/// Quote a stay in a pre-selected season
async fn quote_season(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SeasonQuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let pricing = &state.config.pricing;
    let inputs = request.pricing_inputs(pricing)?;

    let quote = services::quote_season_stay(
        pricing,
        request.season,
        request.nights,
        &inputs,
        &request.meta(pricing),
    )?;

    Ok(Json(QuoteResponse::new(quote)))
}
