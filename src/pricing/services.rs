//! Pricing service functions.
//!
//! Glue between the HTTP layer and the pure calculators: applies service
//! limits, consults the cache, and logs each quote.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::AppCache;
use crate::calendar::{Calendar, SeasonKind};
use crate::config::PricingConfig;

use super::calculators::{quote_for_season, quote_stay};
use super::error::PricingError;
use super::models::{PricingInputs, QuoteMeta, StayQuote, StayResolution};
use super::resolver::{count_nights, resolve_stay};

/// Resolve stay dates, serving repeated lookups from the cache.
///
/// Stays longer than `max_stay_nights` are rejected before any night is
/// classified.
pub async fn resolve_stay_cached(
    cache: &AppCache,
    calendar: &Calendar,
    config: &PricingConfig,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<Arc<StayResolution>, PricingError> {
    let nights = count_nights(check_in, check_out)?;
    if nights > config.max_stay_nights {
        return Err(PricingError::StayTooLong {
            nights,
            max: config.max_stay_nights,
        });
    }

    let key = (check_in, check_out);
    if let Some(cached) = cache.stays.get(&key).await {
        debug!("Cache HIT for stay {} -> {}", check_in, check_out);
        return Ok(cached);
    }

    debug!("Cache MISS for stay {} -> {}", check_in, check_out);
    let resolved = Arc::new(resolve_stay(calendar, check_in, check_out)?);
    cache.stays.insert(key, Arc::clone(&resolved)).await;
    Ok(resolved)
}

/// Quote a stay by its dates.
pub async fn quote_dated_stay(
    cache: &AppCache,
    calendar: &Calendar,
    config: &PricingConfig,
    check_in: NaiveDate,
    check_out: NaiveDate,
    inputs: &PricingInputs,
    meta: &QuoteMeta,
) -> Result<StayQuote, PricingError> {
    let stay = resolve_stay_cached(cache, calendar, config, check_in, check_out).await?;
    let quote = quote_stay(&stay, inputs, &config.rate_table, meta)?;

    info!(
        check_in = %check_in,
        check_out = %check_out,
        nights = quote.nights,
        guests = quote.guests,
        season = %quote.predominant_kind,
        total = %quote.grand_total,
        "Quoted stay"
    );
    Ok(quote)
}

/// Quote a stay in a pre-selected season.
pub fn quote_season_stay(
    config: &PricingConfig,
    season: SeasonKind,
    nights: i64,
    inputs: &PricingInputs,
    meta: &QuoteMeta,
) -> Result<StayQuote, PricingError> {
    if let Ok(n) = u32::try_from(nights) {
        if n > config.max_stay_nights {
            return Err(PricingError::StayTooLong {
                nights: n,
                max: config.max_stay_nights,
            });
        }
    }

    let quote = quote_for_season(season, nights, inputs, &config.rate_table, meta)?;

    info!(
        nights = quote.nights,
        guests = quote.guests,
        season = %season,
        total = %quote.grand_total,
        "Quoted season stay"
    );
    Ok(quote)
}
