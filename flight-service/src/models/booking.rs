//! Booking model.

use super::{double_option, normalize_price, validate_len, validate_price};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Status every new booking starts in.
pub const BOOKING_STATUS_CONFIRMED: &str = "confirmed";

/// A passenger's reservation on a flight.
///
/// `flight_number` is copied from the flight at booking time and is not a
/// reference: deleting the flight leaves the booking intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub title: String,
    pub passenger_name: String,
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_date: NaiveDate,
    pub arrival_time: NaiveTime,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub seat_number: Option<String>,
    pub price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BOOKING_STATUS_CONFIRMED
    }

    /// Apply a partial update in place. Timestamps are left to the caller.
    pub fn apply(&mut self, update: &UpdateBooking) {
        if let Some(v) = &update.title {
            self.title = v.clone();
        }
        if let Some(v) = &update.passenger_name {
            self.passenger_name = v.clone();
        }
        if let Some(v) = &update.flight_number {
            self.flight_number = v.clone();
        }
        if let Some(v) = update.departure_date {
            self.departure_date = v;
        }
        if let Some(v) = update.departure_time {
            self.departure_time = v;
        }
        if let Some(v) = update.arrival_date {
            self.arrival_date = v;
        }
        if let Some(v) = update.arrival_time {
            self.arrival_time = v;
        }
        if let Some(v) = &update.departure_airport {
            self.departure_airport = v.clone();
        }
        if let Some(v) = &update.arrival_airport {
            self.arrival_airport = v.clone();
        }
        if let Some(v) = &update.seat_number {
            self.seat_number = v.clone();
        }
        if let Some(v) = update.price {
            self.price = normalize_price(v);
        }
        if let Some(v) = &update.status {
            self.status = v.clone();
        }
    }
}

/// Input for creating a booking. New bookings are always confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBooking {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub passenger_name: String,
    #[validate(length(min = 1, max = 20))]
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_date: NaiveDate,
    pub arrival_time: NaiveTime,
    #[validate(length(min = 1, max = 10))]
    pub departure_airport: String,
    #[validate(length(min = 1, max = 10))]
    pub arrival_airport: String,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub seat_number: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

/// Partial update of a booking. Absent fields are left unchanged; an
/// explicit `null` for `seat_number` clears the seat.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_booking_update"))]
pub struct UpdateBooking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub passenger_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 10))]
    pub departure_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 10))]
    pub arrival_airport: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub seat_number: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub status: Option<String>,
}

fn validate_booking_update(update: &UpdateBooking) -> Result<(), ValidationError> {
    if let Some(price) = &update.price {
        validate_price(price)?;
    }
    if let Some(Some(seat)) = &update.seat_number {
        validate_len(seat, 0, 10)?;
    }
    Ok(())
}
