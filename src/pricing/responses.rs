//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::calendar::HolidayEntry;
use crate::config::PricingConfig;

use super::calculators::format_currency;
use super::models::{RateTable, StayQuote, INCLUDED_GUESTS, MAX_GUESTS};

/// Prefix of exported quote documents
pub const EXPORT_PREFIX: &str = "cotizacion-delventto";

/// Quote plus what an export or print view needs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub export_id: Uuid,
    pub export_filename: String,
    pub quote: StayQuote,
    pub formatted: FormattedAmounts,
}

impl QuoteResponse {
    pub fn new(quote: StayQuote) -> Self {
        let export_id = Uuid::new_v4();
        Self {
            export_id,
            export_filename: format!("{}-{}.json", EXPORT_PREFIX, export_id),
            formatted: FormattedAmounts::from(&quote),
            quote,
        }
    }
}

/// Monetary fields rendered for display, e.g. `$ 1.133.000`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAmounts {
    pub base_cost: String,
    pub extra_guest_cost: String,
    pub subtotal_before_discount: String,
    pub discount_amount: String,
    pub accommodation_total: String,
    pub cleaning_fee: String,
    pub grand_total: String,
}

impl From<&StayQuote> for FormattedAmounts {
    fn from(q: &StayQuote) -> Self {
        Self {
            base_cost: format_currency(q.base_cost),
            extra_guest_cost: format_currency(q.extra_guest_cost),
            subtotal_before_discount: format_currency(q.subtotal_before_discount),
            discount_amount: format_currency(q.discount_amount),
            accommodation_total: format_currency(q.accommodation_total),
            cleaning_fee: format_currency(q.cleaning_fee),
            grand_total: format_currency(q.grand_total),
        }
    }
}

/// Defaults a booking form starts from
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    pub rates: RateTable,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_guest_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cleaning_fee: Decimal,
    pub included_guests: u8,
    pub max_guests: u8,
    pub max_stay_nights: u32,
    pub currency: String,
    /// Last date the season table covers
    pub bookable_until: Option<NaiveDate>,
}

impl RatesResponse {
    pub fn new(config: &PricingConfig, bookable_until: Option<NaiveDate>) -> Self {
        Self {
            rates: config.rate_table,
            extra_guest_fee: config.extra_guest_fee,
            cleaning_fee: config.cleaning_fee,
            included_guests: INCLUDED_GUESTS,
            max_guests: MAX_GUESTS,
            max_stay_nights: config.max_stay_nights,
            currency: config.currency.clone(),
            bookable_until,
        }
    }
}

/// Holidays of one year
#[derive(Debug, Serialize)]
pub struct HolidaysResponse {
    pub year: i32,
    pub holidays: Vec<HolidayEntry>,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SeasonKind;
    use crate::pricing::calculators::quote_for_season;
    use crate::pricing::models::{Discount, Fees, PricingInputs, QuoteMeta};
    use rust_decimal_macros::dec;

    fn quote() -> StayQuote {
        let config = PricingConfig::default();
        let inputs = PricingInputs {
            rates: config.rate_table.defaults(),
            guests: 2,
            fees: Fees {
                extra_guest_rate: dec!(60000),
                cleaning_fee: dec!(80000),
            },
            discount: Discount::new(dec!(10), "Reserva directa"),
        };
        let meta = QuoteMeta::default();
        quote_for_season(SeasonKind::Mid, 3, &inputs, &config.rate_table, &meta).unwrap()
    }

    #[test]
    fn test_formatted_amounts() {
        let formatted = FormattedAmounts::from(&quote());
        assert_eq!(formatted.base_cost, "$ 1.170.000");
        assert_eq!(formatted.discount_amount, "$ 117.000");
        assert_eq!(formatted.grand_total, "$ 1.133.000");
    }

    #[test]
    fn test_export_filename_uses_id() {
        let response = QuoteResponse::new(quote());
        assert_eq!(
            response.export_filename,
            format!("cotizacion-delventto-{}.json", response.export_id)
        );
    }

    #[test]
    fn test_rates_response_shape() {
        let response = RatesResponse::new(&PricingConfig::default(), None);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["rates"]["high"]["default"], "590000");
        assert_eq!(json["maxGuests"], 5);
        assert_eq!(json["extraGuestFee"], "60000");
    }
}
