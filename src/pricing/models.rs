//! Value types for the pricing engine.
//!
//! All amounts are whole currency units held as `Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calendar::{HolidayEntry, SeasonKind};

use super::error::PricingError;

/// Most guests the apartment accepts
pub const MAX_GUESTS: u8 = 5;

/// Guests covered by the nightly rate; each guest beyond this pays the
/// extra-guest rate per night.
pub const INCLUDED_GUESTS: u8 = 4;

/// Allowed and default nightly rate for one season kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateBounds {
    #[serde(with = "rust_decimal::serde::str")]
    pub min: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub max: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub default: Decimal,
}

impl RateBounds {
    pub fn contains(&self, rate: Decimal) -> bool {
        self.min <= rate && rate <= self.max
    }

    /// `min <= default <= max`
    pub fn is_consistent(&self) -> bool {
        self.min <= self.default && self.default <= self.max
    }
}

/// Rate bounds per season kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateTable {
    pub high: RateBounds,
    pub mid: RateBounds,
    pub low: RateBounds,
}

impl RateTable {
    pub fn bounds(&self, kind: SeasonKind) -> &RateBounds {
        match kind {
            SeasonKind::High => &self.high,
            SeasonKind::Mid => &self.mid,
            SeasonKind::Low => &self.low,
        }
    }

    /// The default rate of every kind.
    pub fn defaults(&self) -> SeasonRates {
        SeasonRates {
            high: self.high.default,
            mid: self.mid.default,
            low: self.low.default,
        }
    }

    /// Reject a nightly rate outside its kind's bounds.
    pub fn check(&self, kind: SeasonKind, rate: Decimal) -> Result<(), PricingError> {
        let bounds = self.bounds(kind);
        if bounds.contains(rate) {
            Ok(())
        } else {
            Err(PricingError::RateOutOfBounds {
                kind,
                rate,
                min: bounds.min,
                max: bounds.max,
            })
        }
    }
}

/// Selected nightly rate per season kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonRates {
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
}

impl SeasonRates {
    pub fn rate(&self, kind: SeasonKind) -> Decimal {
        match kind {
            SeasonKind::High => self.high,
            SeasonKind::Mid => self.mid,
            SeasonKind::Low => self.low,
        }
    }

    pub fn with_rate(mut self, kind: SeasonKind, rate: Decimal) -> Self {
        match kind {
            SeasonKind::High => self.high = rate,
            SeasonKind::Mid => self.mid = rate,
            SeasonKind::Low => self.low = rate,
        }
        self
    }
}

/// Nights of a stay tallied per season kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NightsByKind {
    pub high: u32,
    pub mid: u32,
    pub low: u32,
}

impl NightsByKind {
    /// All nights on a single kind.
    pub fn single(kind: SeasonKind, nights: u32) -> Self {
        Self::default().with(kind, nights)
    }

    fn with(mut self, kind: SeasonKind, nights: u32) -> Self {
        *self.slot(kind) = nights;
        self
    }

    fn slot(&mut self, kind: SeasonKind) -> &mut u32 {
        match kind {
            SeasonKind::High => &mut self.high,
            SeasonKind::Mid => &mut self.mid,
            SeasonKind::Low => &mut self.low,
        }
    }

    pub fn get(&self, kind: SeasonKind) -> u32 {
        match kind {
            SeasonKind::High => self.high,
            SeasonKind::Mid => self.mid,
            SeasonKind::Low => self.low,
        }
    }

    pub fn increment(&mut self, kind: SeasonKind) {
        *self.slot(kind) += 1;
    }

    pub fn total(&self) -> u32 {
        self.high + self.mid + self.low
    }

    /// Kind with the most nights; ties go to high, then mid, then low.
    pub fn predominant(&self) -> SeasonKind {
        let mut best = SeasonKind::High;
        for kind in SeasonKind::ALL {
            if self.get(kind) > self.get(best) {
                best = kind;
            }
        }
        best
    }

    /// Kinds with at least one night, in precedence order.
    pub fn occupied(&self) -> impl Iterator<Item = (SeasonKind, u32)> + '_ {
        SeasonKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|&(_, nights)| nights > 0)
    }
}

/// Percentage discount with an opaque label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Discount {
    percent: Decimal,
    label: String,
}

impl Discount {
    /// Percent is clamped into `[0, 100]`.
    pub fn new(percent: Decimal, label: impl Into<String>) -> Self {
        Self {
            percent: percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            label: label.into(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> Decimal {
        self.percent
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Flat charges that do not depend on the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fees {
    /// Per night, per guest beyond [`INCLUDED_GUESTS`]
    pub extra_guest_rate: Decimal,
    pub cleaning_fee: Decimal,
}

/// Everything the aggregator needs besides the nights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingInputs {
    pub rates: SeasonRates,
    pub guests: u8,
    pub fees: Fees,
    pub discount: Discount,
}

/// Descriptive fields copied onto a quote untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteMeta {
    pub client_name: String,
    pub currency: String,
}

/// Cost of the nights spent in one season kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonSubtotal {
    pub nights: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
}

/// Per-kind subtotals; kinds without nights are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubtotalsByKind {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<SeasonSubtotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<SeasonSubtotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<SeasonSubtotal>,
}

impl SubtotalsByKind {
    pub fn get(&self, kind: SeasonKind) -> Option<&SeasonSubtotal> {
        match kind {
            SeasonKind::High => self.high.as_ref(),
            SeasonKind::Mid => self.mid.as_ref(),
            SeasonKind::Low => self.low.as_ref(),
        }
    }

    pub fn insert(&mut self, kind: SeasonKind, subtotal: SeasonSubtotal) {
        let slot = match kind {
            SeasonKind::High => &mut self.high,
            SeasonKind::Mid => &mut self.mid,
            SeasonKind::Low => &mut self.low,
        };
        *slot = Some(subtotal);
    }
}

/// Stay dates resolved against the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayResolution {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub nights_by_kind: NightsByKind,
    pub predominant_kind: SeasonKind,
    pub holidays_in_range: Vec<HolidayEntry>,
}

/// Full cost breakdown of a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayQuote {
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    pub nights: u32,
    pub guests: u8,
    pub nights_by_kind: NightsByKind,
    pub subtotal_by_kind: SubtotalsByKind,
    pub predominant_kind: SeasonKind,
    pub holidays_in_range: Vec<HolidayEntry>,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_cost: Decimal,
    pub extra_guests: u8,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_guest_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_guest_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal_before_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percent: Decimal,
    pub discount_label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub accommodation_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cleaning_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
    pub currency: String,
}
