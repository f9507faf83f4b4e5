//! Request DTOs for pricing API endpoints.
//!
//! All lenient coercion happens here: numbers may arrive as JSON numbers or
//! strings, and an unparsable discount counts as no discount. Rates and fees
//! must be whole currency units. The core only ever sees validated values.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::calendar::SeasonKind;
use crate::config::PricingConfig;
use crate::error::AppError;

use super::calculators::check_guests;
use super::models::{Discount, Fees, PricingInputs, QuoteMeta, SeasonRates};

/// Request to quote a stay by its dates
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayQuoteRequest {
    #[serde(default)]
    pub client_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(deserialize_with = "lenient_count")]
    pub guests: i64,
    #[serde(default)]
    pub rates: RatesRequest,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub extra_guest_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cleaning_fee: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_percent")]
    pub discount_percent: Option<Decimal>,
    #[serde(default)]
    pub discount_label: String,
}

/// Request to quote a stay in one pre-selected season
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonQuoteRequest {
    #[serde(default)]
    pub client_name: String,
    pub season: SeasonKind,
    #[serde(deserialize_with = "lenient_count")]
    pub nights: i64,
    #[serde(deserialize_with = "lenient_count")]
    pub guests: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub rate: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub extra_guest_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cleaning_fee: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_percent")]
    pub discount_percent: Option<Decimal>,
    #[serde(default)]
    pub discount_label: String,
}

/// Nightly rates per season; missing ones take the configured default
#[derive(Debug, Default, Deserialize)]
pub struct RatesRequest {
    #[serde(default, alias = "alta", deserialize_with = "lenient_amount")]
    pub high: Option<Decimal>,
    #[serde(default, alias = "media", deserialize_with = "lenient_amount")]
    pub mid: Option<Decimal>,
    #[serde(default, alias = "baja", deserialize_with = "lenient_amount")]
    pub low: Option<Decimal>,
}

/// Query for resolving stay dates without pricing them
#[derive(Debug, Deserialize)]
pub struct StayQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayQuoteRequest {
    pub fn pricing_inputs(&self, config: &PricingConfig) -> Result<PricingInputs, AppError> {
        let defaults = config.rate_table.defaults();
        let rates = SeasonRates {
            high: self.rates.high.unwrap_or(defaults.high),
            mid: self.rates.mid.unwrap_or(defaults.mid),
            low: self.rates.low.unwrap_or(defaults.low),
        };
        build_inputs(
            rates,
            self.guests,
            self.extra_guest_rate,
            self.cleaning_fee,
            self.discount_percent,
            &self.discount_label,
            config,
        )
    }

    pub fn meta(&self, config: &PricingConfig) -> QuoteMeta {
        quote_meta(&self.client_name, config)
    }
}

impl SeasonQuoteRequest {
    pub fn pricing_inputs(&self, config: &PricingConfig) -> Result<PricingInputs, AppError> {
        let defaults = config.rate_table.defaults();
        let rates = match self.rate {
            Some(rate) => defaults.with_rate(self.season, rate),
            None => defaults,
        };
        build_inputs(
            rates,
            self.guests,
            self.extra_guest_rate,
            self.cleaning_fee,
            self.discount_percent,
            &self.discount_label,
            config,
        )
    }

    pub fn meta(&self, config: &PricingConfig) -> QuoteMeta {
        quote_meta(&self.client_name, config)
    }
}

fn build_inputs(
    rates: SeasonRates,
    guests: i64,
    extra_guest_rate: Option<Decimal>,
    cleaning_fee: Option<Decimal>,
    discount_percent: Option<Decimal>,
    discount_label: &str,
    config: &PricingConfig,
) -> Result<PricingInputs, AppError> {
    let guests = check_guests(guests)?;
    let fees = Fees {
        extra_guest_rate: non_negative(
            "extraGuestRate",
            extra_guest_rate.unwrap_or(config.extra_guest_fee),
        )?,
        cleaning_fee: non_negative("cleaningFee", cleaning_fee.unwrap_or(config.cleaning_fee))?,
    };
    Ok(PricingInputs {
        rates,
        guests,
        fees,
        discount: Discount::new(coerce_percent(discount_percent), discount_label.trim()),
    })
}

fn quote_meta(client_name: &str, config: &PricingConfig) -> QuoteMeta {
    QuoteMeta {
        client_name: client_name.trim().to_string(),
        currency: config.currency.clone(),
    }
}

fn non_negative(field: &str, amount: Decimal) -> Result<Decimal, AppError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(AppError::BadRequest(format!("{} must not be negative", field)))
    } else {
        Ok(amount)
    }
}

/// Missing or negative percentages mean no discount; `Discount::new` caps at 100.
pub fn coerce_percent(percent: Option<Decimal>) -> Decimal {
    match percent {
        Some(p) if p > Decimal::ZERO => p,
        _ => Decimal::ZERO,
    }
}

/// Parse a JSON number or numeric string into a decimal.
pub fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

/// Whole currency units from a JSON number or numeric string.
pub fn whole_amount(value: &Value) -> Result<Decimal, String> {
    let amount =
        coerce_decimal(value).ok_or_else(|| format!("{} is not a representable amount", value))?;
    if !amount.fract().is_zero() {
        return Err(format!("{} is not a whole currency amount", amount));
    }
    Ok(amount.normalize())
}

/// Absent, null or blank amounts take the configured default; anything else
/// must be a whole amount.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(raw) => whole_amount(&raw).map(Some).map_err(de::Error::custom),
    }
}

fn lenient_percent<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_decimal))
}

/// Whole counts; unparsable input becomes 0 and fails validation downstream.
fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value)
        .map(|d| d.trunc())
        .and_then(|d| d.to_i64())
        .unwrap_or(0))
}
