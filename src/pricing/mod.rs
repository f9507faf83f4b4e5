//! Pricing engine module.
//!
//! Resolves stay dates into nights per season and prices them with the
//! extra-guest surcharge, discount and cleaning fee.

pub mod calculators;
pub mod error;
pub mod models;
pub mod requests;
pub mod resolver;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{format_currency, price, quote_for_season, quote_stay, round_money};
pub use error::PricingError;
pub use resolver::resolve_stay;
pub use routes::router;
