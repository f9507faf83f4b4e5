//! Resolve stay dates into nights per season.

use chrono::{Days, NaiveDate};

use crate::calendar::Calendar;

use super::error::PricingError;
use super::models::{NightsByKind, StayResolution};

/// Nights between check-in and check-out, rejecting empty or inverted stays.
pub fn count_nights(check_in: NaiveDate, check_out: NaiveDate) -> Result<u32, PricingError> {
    if check_out <= check_in {
        return Err(PricingError::InvalidRange { check_in, check_out });
    }
    let days = (check_out - check_in).num_days();
    u32::try_from(days)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or(PricingError::InvalidNights(days))
}

/// Classify every night of `[check_in, check_out)` and collect the holidays
/// falling inside the stay.
pub fn resolve_stay(
    calendar: &Calendar,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<StayResolution, PricingError> {
    let nights = count_nights(check_in, check_out)?;

    let mut nights_by_kind = NightsByKind::default();
    for offset in 0..nights {
        let Some(night) = check_in.checked_add_days(Days::new(u64::from(offset))) else {
            return Err(PricingError::InvalidRange { check_in, check_out });
        };
        nights_by_kind.increment(calendar.classify_day(night).kind);
    }

    Ok(StayResolution {
        check_in,
        check_out,
        nights,
        predominant_kind: nights_by_kind.predominant(),
        nights_by_kind,
        holidays_in_range: calendar.holidays.holidays_overlapping(check_in, check_out),
    })
}
