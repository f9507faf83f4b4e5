//! Environment-driven configuration.
//!
//! Every setting has a default; `.env` is loaded by `main` before this runs.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calendar::SeasonKind;
use crate::pricing::models::{RateBounds, RateTable};

pub const DEFAULT_RATES: RateTable = RateTable {
    high: RateBounds {
        min: dec!(560000),
        max: dec!(620000),
        default: dec!(590000),
    },
    mid: RateBounds {
        min: dec!(360000),
        max: dec!(420000),
        default: dec!(390000),
    },
    low: RateBounds {
        min: dec!(260000),
        max: dec!(320000),
        default: dec!(290000),
    },
};

pub const DEFAULT_EXTRA_GUEST_FEE: Decimal = dec!(60000);
pub const DEFAULT_CLEANING_FEE: Decimal = dec!(80000);
pub const DEFAULT_MAX_STAY_NIGHTS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },

    #[error("Rate bounds for {0} season must satisfy min <= default <= max")]
    InconsistentRateBounds(SeasonKind),
}

/// Pricing defaults offered to callers that omit a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub rate_table: RateTable,
    pub extra_guest_fee: Decimal,
    pub cleaning_fee: Decimal,
    pub max_stay_nights: u32,
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rate_table: DEFAULT_RATES,
            extra_guest_fee: DEFAULT_EXTRA_GUEST_FEE,
            cleaning_fee: DEFAULT_CLEANING_FEE,
            max_stay_nights: DEFAULT_MAX_STAY_NIGHTS,
            currency: "COP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub pricing: PricingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            pricing: PricingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// Rate bounds are read from `RATE_<KIND>_<MIN|MAX|DEFAULT>`, e.g.
    /// `RATE_HIGH_MAX=650000`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut rate_table = defaults.pricing.rate_table;
        for kind in SeasonKind::ALL {
            let prefix = format!("RATE_{}", kind.as_str().to_uppercase());
            let current = *rate_table.bounds(kind);
            let bounds = RateBounds {
                min: parse_or(&lookup, &format!("{}_MIN", prefix), current.min)?,
                max: parse_or(&lookup, &format!("{}_MAX", prefix), current.max)?,
                default: parse_or(&lookup, &format!("{}_DEFAULT", prefix), current.default)?,
            };
            if !bounds.is_consistent() {
                return Err(ConfigError::InconsistentRateBounds(kind));
            }
            match kind {
                SeasonKind::High => rate_table.high = bounds,
                SeasonKind::Mid => rate_table.mid = bounds,
                SeasonKind::Low => rate_table.low = bounds,
            }
        }

        let pricing = defaults.pricing;
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            pricing: PricingConfig {
                rate_table,
                extra_guest_fee: parse_or(&lookup, "EXTRA_GUEST_FEE", pricing.extra_guest_fee)?,
                cleaning_fee: parse_or(&lookup, "CLEANING_FEE", pricing.cleaning_fee)?,
                max_stay_nights: parse_or(&lookup, "MAX_STAY_NIGHTS", pricing.max_stay_nights)?,
                currency: lookup("CURRENCY").unwrap_or(pricing.currency),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}
