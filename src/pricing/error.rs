//! Pricing calculation error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use crate::calendar::SeasonKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("A stay must be at least 1 night, got {0}")]
    InvalidNights(i64),

    #[error("Guest count must be between 1 and 5, got {0}")]
    InvalidGuestCount(i64),

    #[error("Nightly rate {rate} for {kind} season must be between {min} and {max}")]
    RateOutOfBounds {
        kind: SeasonKind,
        rate: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Stay of {nights} nights exceeds the maximum of {max}")]
    StayTooLong { nights: u32, max: u32 },

    #[error("Quote amount exceeds the representable range")]
    AmountOverflow,
}

impl PricingError {
    /// Stable identifier used in error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidRange { .. } | PricingError::InvalidNights(_) => "invalid_range",
            PricingError::InvalidGuestCount(_) => "invalid_guest_count",
            PricingError::RateOutOfBounds { .. } => "rate_out_of_bounds",
            PricingError::StayTooLong { .. } => "stay_too_long",
            PricingError::AmountOverflow => "amount_overflow",
        }
    }

    /// Structured context for clients, where the message alone is not enough
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            PricingError::RateOutOfBounds { kind, rate, min, max } => Some(json!({
                "kind": kind,
                "rate": rate.to_string(),
                "min": min.to_string(),
                "max": max.to_string(),
            })),
            PricingError::StayTooLong { nights, max } => Some(json!({
                "nights": nights,
                "max": max,
            })),
            _ => None,
        }
    }
}
