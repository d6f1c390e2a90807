//! Domain models for flight-service.

mod booking;
mod flight;
mod stats;

pub use booking::{Booking, CreateBooking, UpdateBooking, BOOKING_STATUS_CONFIRMED};
pub use flight::{CreateFlight, Flight, UpdateFlight, FLIGHT_STATUS_ACTIVE};
pub use stats::Stats;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// Largest price a NUMERIC(10, 2) column accepts, plus one cent.
const PRICE_CEILING: i64 = 100_000_000;

const DEFAULT_PAGE_LIMIT: i64 = 100;

/// `skip`/`limit` window for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct Page {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

pub(crate) fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price"));
    }
    if normalize_price(*price) >= Decimal::from(PRICE_CEILING) {
        return Err(ValidationError::new("price_too_large"));
    }
    Ok(())
}

/// Length check for fields validated by hand (nested options).
pub(crate) fn validate_len(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::new("length"));
    }
    Ok(())
}

/// Store prices the way NUMERIC(10, 2) does.
pub(crate) fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price;
    price.rescale(2);
    price
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn page_defaults_match_list_endpoints() {
        let page: Page = serde_json::from_str("{}").unwrap();
        assert_eq!(page, Page::new(0, 100));
        assert!(page.validate().is_ok());
    }

    #[test]
    fn page_rejects_out_of_range_limit() {
        assert!(Page::new(0, 0).validate().is_err());
        assert!(Page::new(0, 1001).validate().is_err());
        assert!(Page::new(-1, 10).validate().is_err());
        assert!(Page::new(5, 1000).validate().is_ok());
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price(&Decimal::from_str("0").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("-0.01").unwrap()).is_err());
        assert!(validate_price(&Decimal::from_str("100000000").unwrap()).is_err());
    }

    #[test]
    fn price_rounding_up_to_the_ceiling_is_rejected() {
        assert!(validate_price(&Decimal::from_str("99999999.995").unwrap()).is_err());
        assert!(validate_price(&Decimal::from_str("99999999.994").unwrap()).is_ok());
    }

    #[test]
    fn normalize_price_uses_two_decimals() {
        let price = normalize_price(Decimal::from_str("680").unwrap());
        assert_eq!(price.to_string(), "680.00");

        let price = normalize_price(Decimal::from_str("12.345").unwrap());
        assert_eq!(price.scale(), 2);
    }
}
