//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no shared state.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::calendar::{HolidayEntry, SeasonKind};

use super::error::PricingError;
use super::models::{
    NightsByKind, PricingInputs, QuoteMeta, RateTable, SeasonSubtotal, StayQuote, StayResolution,
    SubtotalsByKind, INCLUDED_GUESTS, MAX_GUESTS,
};

/// Round to specified decimal places, halves rounding away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use delventto_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate a guest count and narrow it to `u8`.
pub fn check_guests(guests: i64) -> Result<u8, PricingError> {
    match u8::try_from(guests) {
        Ok(g) if (1..=MAX_GUESTS).contains(&g) => Ok(g),
        _ => Err(PricingError::InvalidGuestCount(guests)),
    }
}

/// Guests charged the extra-guest rate.
pub fn extra_guests(guests: u8) -> u8 {
    guests.saturating_sub(INCLUDED_GUESTS)
}

/// Money breakdown produced by [`price`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub nights: u32,
    pub guests: u8,
    pub subtotal_by_kind: SubtotalsByKind,
    pub base_cost: Decimal,
    pub extra_guests: u8,
    pub extra_guest_rate: Decimal,
    pub extra_guest_cost: Decimal,
    pub subtotal_before_discount: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub accommodation_total: Decimal,
    pub cleaning_fee: Decimal,
    pub grand_total: Decimal,
}

/// Price a stay from its per-season night counts.
///
/// Order of operations:
/// 1. `rate × nights` for every kind with nights, summed into the base cost
/// 2. extra-guest surcharge over the whole stay at one flat rate
/// 3. discount on base + surcharge, rounded to whole units
/// 4. cleaning fee added after the discount
///
/// Every rate that is charged must sit within its kind's bounds. Amounts
/// beyond the range of `Decimal` fail with `AmountOverflow`.
pub fn price(
    nights_by_kind: &NightsByKind,
    inputs: &PricingInputs,
    rate_table: &RateTable,
) -> Result<PriceBreakdown, PricingError> {
    let guests = check_guests(i64::from(inputs.guests))?;
    let nights = nights_by_kind.total();
    if nights == 0 {
        return Err(PricingError::InvalidNights(0));
    }

    let mut base_cost = Decimal::ZERO;
    let mut subtotal_by_kind = SubtotalsByKind::default();
    for (kind, kind_nights) in nights_by_kind.occupied() {
        let rate = inputs.rates.rate(kind);
        rate_table.check(kind, rate)?;

        let subtotal = checked(rate.checked_mul(Decimal::from(kind_nights)))?;
        base_cost = checked(base_cost.checked_add(subtotal))?;
        subtotal_by_kind.insert(
            kind,
            SeasonSubtotal {
                nights: kind_nights,
                rate,
                subtotal,
            },
        );
    }

    let extra_guests = extra_guests(guests);
    let extra_guest_rate = inputs.fees.extra_guest_rate;
    let extra_guest_cost = checked(
        Decimal::from(extra_guests)
            .checked_mul(extra_guest_rate)
            .and_then(|per_night| per_night.checked_mul(Decimal::from(nights))),
    )?;

    let subtotal_before_discount = checked(base_cost.checked_add(extra_guest_cost))?;

    let discount_percent = inputs.discount.percent();
    let discount_amount = round_money(
        checked(
            subtotal_before_discount
                .checked_mul(discount_percent)
                .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED)),
        )?,
        0,
    );
    let accommodation_total = checked(subtotal_before_discount.checked_sub(discount_amount))?;

    let cleaning_fee = inputs.fees.cleaning_fee;
    let grand_total = checked(accommodation_total.checked_add(cleaning_fee))?;

    Ok(PriceBreakdown {
        nights,
        guests,
        subtotal_by_kind,
        base_cost,
        extra_guests,
        extra_guest_rate,
        extra_guest_cost,
        subtotal_before_discount,
        discount_percent,
        discount_amount,
        accommodation_total,
        cleaning_fee,
        grand_total,
    })
}

fn checked(amount: Option<Decimal>) -> Result<Decimal, PricingError> {
    amount.ok_or(PricingError::AmountOverflow)
}

/// Quote a stay already resolved against the calendar.
pub fn quote_stay(
    stay: &StayResolution,
    inputs: &PricingInputs,
    rate_table: &RateTable,
    meta: &QuoteMeta,
) -> Result<StayQuote, PricingError> {
    let breakdown = price(&stay.nights_by_kind, inputs, rate_table)?;
    Ok(assemble(
        breakdown,
        stay.nights_by_kind,
        stay.predominant_kind,
        Some((stay.check_in, stay.check_out)),
        stay.holidays_in_range.clone(),
        inputs,
        meta,
    ))
}

/// Quote a stay whose nights all fall in one pre-selected season.
pub fn quote_for_season(
    kind: SeasonKind,
    nights: i64,
    inputs: &PricingInputs,
    rate_table: &RateTable,
    meta: &QuoteMeta,
) -> Result<StayQuote, PricingError> {
    let nights = u32::try_from(nights)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or(PricingError::InvalidNights(nights))?;

    let nights_by_kind = NightsByKind::single(kind, nights);
    let breakdown = price(&nights_by_kind, inputs, rate_table)?;
    Ok(assemble(breakdown, nights_by_kind, kind, None, Vec::new(), inputs, meta))
}

fn assemble(
    b: PriceBreakdown,
    nights_by_kind: NightsByKind,
    predominant_kind: SeasonKind,
    dates: Option<(NaiveDate, NaiveDate)>,
    holidays_in_range: Vec<HolidayEntry>,
    inputs: &PricingInputs,
    meta: &QuoteMeta,
) -> StayQuote {
    StayQuote {
        client_name: meta.client_name.clone(),
        check_in: dates.map(|(check_in, _)| check_in),
        check_out: dates.map(|(_, check_out)| check_out),
        nights: b.nights,
        guests: b.guests,
        nights_by_kind,
        subtotal_by_kind: b.subtotal_by_kind,
        predominant_kind,
        holidays_in_range,
        base_cost: b.base_cost,
        extra_guests: b.extra_guests,
        extra_guest_rate: b.extra_guest_rate,
        extra_guest_cost: b.extra_guest_cost,
        subtotal_before_discount: b.subtotal_before_discount,
        discount_percent: b.discount_percent,
        discount_label: inputs.discount.label().to_string(),
        discount_amount: b.discount_amount,
        accommodation_total: b.accommodation_total,
        cleaning_fee: b.cleaning_fee,
        grand_total: b.grand_total,
        currency: meta.currency.clone(),
    }
}

/// Whole-unit amount with `.` thousands separators, e.g. `1.133.000`.
pub fn format_number(amount: Decimal) -> String {
    let rounded = round_money(amount, 0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Colombian peso amount as the es-CO locale prints it, e.g. `$ 1.133.000`.
pub fn format_currency(amount: Decimal) -> String {
    let number = format_number(amount);
    match number.strip_prefix('-') {
        Some(abs) => format!("-$ {}", abs),
        None => format!("$ {}", number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{Discount, Fees, RateBounds, SeasonRates};
    use rust_decimal_macros::dec;

    fn rate_table() -> RateTable {
        RateTable {
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
        }
    }

    fn inputs(guests: u8, discount: Decimal) -> PricingInputs {
        PricingInputs {
            rates: rate_table().defaults(),
            guests,
            fees: Fees {
                extra_guest_rate: dec!(60000),
                cleaning_fee: dec!(80000),
            },
            discount: Discount::new(discount, "Reserva directa"),
        }
    }

    fn meta() -> QuoteMeta {
        QuoteMeta {
            client_name: "Ana".to_string(),
            currency: "COP".to_string(),
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.49), 0), dec!(2));
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
    }

    #[test]
    fn test_round_money_decimal_places() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== guest tests ====================

    #[test]
    fn test_check_guests_bounds() {
        assert_eq!(check_guests(1).unwrap(), 1);
        assert_eq!(check_guests(5).unwrap(), 5);
        assert_eq!(check_guests(0).unwrap_err(), PricingError::InvalidGuestCount(0));
        assert_eq!(check_guests(6).unwrap_err(), PricingError::InvalidGuestCount(6));
        assert_eq!(check_guests(-3).unwrap_err(), PricingError::InvalidGuestCount(-3));
        assert_eq!(check_guests(300).unwrap_err(), PricingError::InvalidGuestCount(300));
    }

    #[test]
    fn test_extra_guests_only_fifth_guest() {
        for g in 1..=5u8 {
            assert_eq!(extra_guests(g), g.saturating_sub(4));
        }
        assert_eq!(extra_guests(4), 0);
        assert_eq!(extra_guests(5), 1);
    }

    // ==================== price tests ====================

    #[test]
    fn test_price_mid_season_with_discount() {
        let nights = NightsByKind::single(SeasonKind::Mid, 3);
        let b = price(&nights, &inputs(2, dec!(10)), &rate_table()).unwrap();

        assert_eq!(b.base_cost, dec!(1170000));
        assert_eq!(b.extra_guest_cost, dec!(0));
        assert_eq!(b.discount_amount, dec!(117000));
        assert_eq!(b.accommodation_total, dec!(1053000));
        assert_eq!(b.grand_total, dec!(1133000));
    }

    #[test]
    fn test_price_extra_guest_surcharge() {
        let nights = NightsByKind::single(SeasonKind::Low, 3);
        let b = price(&nights, &inputs(5, dec!(0)), &rate_table()).unwrap();

        assert_eq!(b.extra_guests, 1);
        assert_eq!(b.extra_guest_cost, dec!(180000));
        assert_eq!(b.base_cost, dec!(870000));
        assert_eq!(b.subtotal_before_discount, dec!(1050000));
    }

    #[test]
    fn test_price_surcharge_is_flat_across_seasons() {
        let nights = NightsByKind { high: 2, mid: 1, low: 1 };
        let b = price(&nights, &inputs(5, dec!(0)), &rate_table()).unwrap();

        assert_eq!(b.nights, 4);
        assert_eq!(b.extra_guest_cost, dec!(240000));
        // 2 × 590000 + 390000 + 290000
        assert_eq!(b.base_cost, dec!(1860000));
        assert_eq!(b.subtotal_by_kind.get(SeasonKind::High).unwrap().subtotal, dec!(1180000));
        assert_eq!(b.subtotal_by_kind.get(SeasonKind::Mid).unwrap().nights, 1);
    }

    #[test]
    fn test_price_breakdown_omits_empty_kinds() {
        let nights = NightsByKind::single(SeasonKind::High, 2);
        let b = price(&nights, &inputs(2, dec!(0)), &rate_table()).unwrap();
        assert!(b.subtotal_by_kind.get(SeasonKind::Mid).is_none());
        assert!(b.subtotal_by_kind.get(SeasonKind::Low).is_none());
    }

    #[test]
    fn test_price_no_discount_keeps_subtotal() {
        let nights = NightsByKind { high: 1, mid: 2, low: 3 };
        let b = price(&nights, &inputs(3, dec!(0)), &rate_table()).unwrap();
        assert_eq!(b.discount_amount, dec!(0));
        assert_eq!(b.accommodation_total, b.subtotal_before_discount);
    }

    #[test]
    fn test_price_discount_is_monotonic() {
        let nights = NightsByKind { high: 1, mid: 1, low: 1 };
        let mut previous = None;
        for pct in [dec!(0), dec!(5), dec!(10), dec!(25), dec!(50), dec!(100)] {
            let b = price(&nights, &inputs(5, pct), &rate_table()).unwrap();
            if let Some(prev) = previous {
                assert!(b.accommodation_total < prev, "{}% did not lower the total", pct);
            }
            previous = Some(b.accommodation_total);
        }
    }

    #[test]
    fn test_price_cleaning_fee_not_discounted() {
        let nights = NightsByKind::single(SeasonKind::Mid, 2);
        for pct in [dec!(0), dec!(15), dec!(100)] {
            let b = price(&nights, &inputs(4, pct), &rate_table()).unwrap();
            assert_eq!(b.grand_total, b.accommodation_total + dec!(80000));
        }
        let full = price(&nights, &inputs(4, dec!(100)), &rate_table()).unwrap();
        assert_eq!(full.accommodation_total, dec!(0));
        assert_eq!(full.grand_total, dec!(80000));
    }

    #[test]
    fn test_price_discount_rounds_half_up() {
        let nights = NightsByKind::single(SeasonKind::Low, 1);
        let mut i = inputs(2, dec!(0.5));
        i.rates = i.rates.with_rate(SeasonKind::Low, dec!(260001));
        let b = price(&nights, &i, &rate_table()).unwrap();
        // 260001 × 0.5 / 100 = 1300.005
        assert_eq!(b.discount_amount, dec!(1300));

        i.rates = i.rates.with_rate(SeasonKind::Low, dec!(260100));
        let b = price(&nights, &i, &rate_table()).unwrap();
        // 1300.5 rounds up
        assert_eq!(b.discount_amount, dec!(1301));
    }

    #[test]
    fn test_price_is_idempotent() {
        let nights = NightsByKind { high: 2, mid: 3, low: 0 };
        let i = inputs(5, dec!(7.5));
        let first = price(&nights, &i, &rate_table()).unwrap();
        let second = price(&nights, &i, &rate_table()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_price_rejects_rate_out_of_bounds() {
        let nights = NightsByKind::single(SeasonKind::Mid, 2);
        let mut i = inputs(2, dec!(0));
        i.rates = SeasonRates {
            high: dec!(590000),
            mid: dec!(999999),
            low: dec!(290000),
        };
        let err = price(&nights, &i, &rate_table()).unwrap_err();
        assert!(matches!(err, PricingError::RateOutOfBounds { kind: SeasonKind::Mid, .. }));
    }

    #[test]
    fn test_price_ignores_bounds_of_unused_kinds() {
        let nights = NightsByKind::single(SeasonKind::Mid, 2);
        let mut i = inputs(2, dec!(0));
        i.rates = i.rates.with_rate(SeasonKind::High, dec!(1));
        assert!(price(&nights, &i, &rate_table()).is_ok());
    }

    #[test]
    fn test_price_rejects_bad_guest_count() {
        let nights = NightsByKind::single(SeasonKind::Mid, 2);
        for g in [0u8, 6] {
            let err = price(&nights, &inputs(g, dec!(0)), &rate_table()).unwrap_err();
            assert_eq!(err, PricingError::InvalidGuestCount(i64::from(g)));
        }
    }

    #[test]
    fn test_price_rejects_zero_nights() {
        let err = price(&NightsByKind::default(), &inputs(2, dec!(0)), &rate_table()).unwrap_err();
        assert_eq!(err, PricingError::InvalidNights(0));
    }

    #[test]
    fn test_price_oversized_extra_guest_rate_fails() {
        let nights = NightsByKind::single(SeasonKind::Low, 2);
        let mut i = inputs(5, dec!(0));
        i.fees.extra_guest_rate = Decimal::MAX;
        let err = price(&nights, &i, &rate_table()).unwrap_err();
        assert_eq!(err, PricingError::AmountOverflow);
    }

    #[test]
    fn test_price_oversized_cleaning_fee_fails() {
        let nights = NightsByKind::single(SeasonKind::Low, 1);
        let mut i = inputs(2, dec!(0));
        i.fees.cleaning_fee = Decimal::MAX;
        let err = price(&nights, &i, &rate_table()).unwrap_err();
        assert_eq!(err, PricingError::AmountOverflow);
    }

    #[test]
    fn test_price_large_fee_within_range_succeeds() {
        let nights = NightsByKind::single(SeasonKind::Low, 1);
        let mut i = inputs(2, dec!(0));
        i.fees.cleaning_fee = Decimal::MAX - dec!(290000);
        let b = price(&nights, &i, &rate_table()).unwrap();
        assert_eq!(b.grand_total, Decimal::MAX);
    }

    // ==================== quote tests ====================

    #[test]
    fn test_quote_for_season() {
        let i = inputs(5, dec!(0));
        let q = quote_for_season(SeasonKind::High, 2, &i, &rate_table(), &meta()).unwrap();
        assert_eq!(q.predominant_kind, SeasonKind::High);
        assert_eq!(q.nights_by_kind, NightsByKind { high: 2, mid: 0, low: 0 });
        assert_eq!(q.base_cost, dec!(1180000));
        assert_eq!(q.extra_guest_cost, dec!(120000));
        assert_eq!(q.grand_total, dec!(1380000));
        assert!(q.check_in.is_none());
        assert!(q.holidays_in_range.is_empty());
        assert_eq!(q.client_name, "Ana");
        assert_eq!(q.discount_label, "Reserva directa");
    }

    #[test]
    fn test_quote_for_season_rejects_bad_nights() {
        for n in [0, -1] {
            let i = inputs(2, dec!(0));
            let err = quote_for_season(SeasonKind::Mid, n, &i, &rate_table(), &meta()).unwrap_err();
            assert_eq!(err, PricingError::InvalidNights(n));
        }
    }

    #[test]
    fn test_quote_serializes_camel_case() {
        let i = inputs(2, dec!(10));
        let q = quote_for_season(SeasonKind::Mid, 3, &i, &rate_table(), &meta()).unwrap();
        let json = serde_json::to_value(&q).unwrap();

        assert_eq!(json["grandTotal"], "1133000");
        assert_eq!(json["nightsByKind"]["mid"], 3);
        assert_eq!(json["nightsByKind"]["high"], 0);
        assert_eq!(json["subtotalByKind"]["mid"]["subtotal"], "1170000");
        assert!(json["subtotalByKind"].get("high").is_none());
        assert_eq!(json["predominantKind"], "mid");
        assert!(json.get("checkIn").is_none());
    }

    // ==================== formatting tests ====================

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(dec!(0)), "0");
        assert_eq!(format_number(dec!(999)), "999");
        assert_eq!(format_number(dec!(1000)), "1.000");
        assert_eq!(format_number(dec!(1133000)), "1.133.000");
        assert_eq!(format_number(dec!(1234567.6)), "1.234.568");
        assert_eq!(format_number(dec!(-45000)), "-45.000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1133000)), "$ 1.133.000");
        assert_eq!(format_currency(dec!(80000)), "$ 80.000");
        assert_eq!(format_currency(dec!(-117000)), "-$ 117.000");
    }
}
