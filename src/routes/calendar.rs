//! Calendar route handlers

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::NaiveDate;

use crate::calendar::DayClassification;
use crate::error::{AppError, Result};
use crate::pricing::models::StayResolution;
use crate::pricing::requests::StayQuery;
use crate::pricing::responses::HolidaysResponse;
use crate::pricing::services;
use crate::AppState;

/// Classify a single night
pub async fn day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayClassification>> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", date))
    })?;

    Ok(Json(state.calendar.classify_day(date)))
}

/// Holidays of a year; years outside the calendar yield an empty list
pub async fn holidays(
    State(state): State<AppState>,
    year: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<HolidaysResponse>> {
    let Path(year) = year?;

    Ok(Json(HolidaysResponse {
        year,
        holidays: state.calendar.holidays.holidays_for_year(year).to_vec(),
    }))
}

/// Nights per season and holidays for a date range
pub async fn stay(
    State(state): State<AppState>,
    query: std::result::Result<Query<StayQuery>, QueryRejection>,
) -> Result<Json<StayResolution>> {
    let Query(query) = query?;

    let resolved = services::resolve_stay_cached(
        &state.cache,
        &state.calendar,
        &state.config.pricing,
        query.check_in,
        query.check_out,
    )
    .await?;

    Ok(Json(StayResolution::clone(&resolved)))
}
