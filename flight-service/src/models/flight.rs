//! Flight model.

use super::{double_option, validate_len, validate_price};
use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Status of a flight that is listed and searchable.
pub const FLIGHT_STATUS_ACTIVE: &str = "active";

/// A scheduled flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Flight {
    pub id: i64,
    pub flight_number: String,
    pub airline: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub price: Decimal,
    pub available_seats: i32,
    pub aircraft_type: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flight {
    pub fn is_active(&self) -> bool {
        self.status == FLIGHT_STATUS_ACTIVE
    }

    /// Apply a partial update in place. Timestamps are left to the caller.
    pub fn apply(&mut self, update: &UpdateFlight) {
        if let Some(v) = &update.flight_number {
            self.flight_number = v.clone();
        }
        if let Some(v) = &update.airline {
            self.airline = v.clone();
        }
        if let Some(v) = &update.departure_airport {
            self.departure_airport = v.clone();
        }
        if let Some(v) = &update.arrival_airport {
            self.arrival_airport = v.clone();
        }
        if let Some(v) = update.departure_time {
            self.departure_time = v;
        }
        if let Some(v) = update.arrival_time {
            self.arrival_time = v;
        }
        if let Some(v) = update.price {
            self.price = super::normalize_price(v);
        }
        if let Some(v) = update.available_seats {
            self.available_seats = v;
        }
        if let Some(v) = &update.aircraft_type {
            self.aircraft_type = v.clone();
        }
        if let Some(v) = &update.status {
            self.status = v.clone();
        }
    }
}

fn default_status() -> String {
    FLIGHT_STATUS_ACTIVE.to_string()
}

/// Input for creating a flight.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFlight {
    #[validate(length(min = 1, max = 20))]
    pub flight_number: String,
    #[validate(length(min = 1, max = 50))]
    pub airline: String,
    #[validate(length(min = 1, max = 10))]
    pub departure_airport: String,
    #[validate(length(min = 1, max = 10))]
    pub arrival_airport: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub available_seats: i32,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub aircraft_type: Option<String>,
    #[serde(default = "default_status")]
    #[validate(length(min = 1, max = 20))]
    pub status: String,
}

/// Partial update of a flight. Absent fields are left unchanged; an explicit
/// `null` for `aircraft_type` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_flight_update"))]
pub struct UpdateFlight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub airline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 10))]
    pub departure_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 10))]
    pub arrival_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub available_seats: Option<i32>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub aircraft_type: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub status: Option<String>,
}

fn validate_flight_update(update: &UpdateFlight) -> Result<(), ValidationError> {
    if let Some(price) = &update.price {
        validate_price(price)?;
    }
    if let Some(Some(aircraft)) = &update.aircraft_type {
        validate_len(aircraft, 0, 50)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_payload() -> serde_json::Value {
        json!({
            "flight_number": "CA1001",
            "airline": "Air China",
            "departure_airport": "PEK",
            "arrival_airport": "SHA",
            "departure_time": "08:30:00",
            "arrival_time": "10:45:00",
            "price": "680.00"
        })
    }

    #[test]
    fn create_flight_applies_defaults() {
        let input: CreateFlight = serde_json::from_value(create_payload()).unwrap();
        assert_eq!(input.available_seats, 0);
        assert_eq!(input.status, FLIGHT_STATUS_ACTIVE);
        assert!(input.aircraft_type.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_flight_rejects_long_airport_code() {
        let mut payload = create_payload();
        payload["departure_airport"] = json!("BEIJING-CAPITAL");
        let input: CreateFlight = serde_json::from_value(payload).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_distinguishes_null_from_absent() {
        let cleared: UpdateFlight = serde_json::from_value(json!({ "aircraft_type": null })).unwrap();
        assert_eq!(cleared.aircraft_type, Some(None));

        let untouched: UpdateFlight = serde_json::from_value(json!({ "status": "cancelled" })).unwrap();
        assert_eq!(untouched.aircraft_type, None);
        assert_eq!(untouched.status.as_deref(), Some("cancelled"));
    }

    #[test]
    fn update_rejects_negative_price() {
        let update: UpdateFlight = serde_json::from_value(json!({ "price": "-5" })).unwrap();
        assert!(update.validate().is_err());
    }
}
