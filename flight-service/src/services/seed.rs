//! Sample data for a fresh database.

use super::store::FlightStore;
use crate::models::{CreateBooking, CreateFlight, FLIGHT_STATUS_ACTIVE};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use service_core::error::AppError;
use tracing::info;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn on(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn flight(
    flight_number: &str,
    airline: &str,
    route: (&str, &str),
    departure_time: NaiveTime,
    arrival_time: NaiveTime,
    price_cents: i64,
    available_seats: i32,
    aircraft_type: &str,
) -> CreateFlight {
    CreateFlight {
        flight_number: flight_number.to_string(),
        airline: airline.to_string(),
        departure_airport: route.0.to_string(),
        arrival_airport: route.1.to_string(),
        departure_time,
        arrival_time,
        price: Decimal::new(price_cents, 2),
        available_seats,
        aircraft_type: Some(aircraft_type.to_string()),
        status: FLIGHT_STATUS_ACTIVE.to_string(),
    }
}

pub fn sample_flights() -> Vec<CreateFlight> {
    vec![
        flight("CA1001", "Air China", ("PEK", "SHA"), at(8, 30), at(10, 45), 68000, 120, "Boeing 737"),
        flight("MU2001", "China Eastern Airlines", ("SHA", "CAN"), at(14, 20), at(17, 10), 86000, 180, "Airbus A320"),
        flight("CZ3001", "China Southern Airlines", ("CAN", "CTU"), at(19, 45), at(22, 30), 72000, 160, "Boeing 787"),
        flight("3U4001", "Sichuan Airlines", ("CTU", "KMG"), at(9, 15), at(11, 50), 58000, 140, "Airbus A319"),
        flight("MF5001", "Xiamen Airlines", ("XIY", "HGH"), at(16, 30), at(19, 15), 92000, 100, "Boeing 737 MAX"),
    ]
}

pub fn sample_bookings() -> Vec<CreateBooking> {
    vec![
        CreateBooking {
            title: "Zhang San business trip".to_string(),
            passenger_name: "Zhang San".to_string(),
            flight_number: "CA1001".to_string(),
            departure_date: on(2024, 7, 15),
            departure_time: at(8, 30),
            arrival_date: on(2024, 7, 15),
            arrival_time: at(10, 45),
            departure_airport: "PEK".to_string(),
            arrival_airport: "SHA".to_string(),
            seat_number: Some("12A".to_string()),
            price: Decimal::new(68000, 2),
        },
        CreateBooking {
            title: "Li Si holiday".to_string(),
            passenger_name: "Li Si".to_string(),
            flight_number: "MU2001".to_string(),
            departure_date: on(2024, 7, 20),
            departure_time: at(14, 20),
            arrival_date: on(2024, 7, 20),
            arrival_time: at(17, 10),
            departure_airport: "SHA".to_string(),
            arrival_airport: "CAN".to_string(),
            seat_number: Some("8C".to_string()),
            price: Decimal::new(86000, 2),
        },
    ]
}

/// Insert the sample flights and bookings unless flights already exist.
///
/// Returns whether anything was inserted.
pub async fn seed_if_empty(store: &dyn FlightStore) -> Result<bool, AppError> {
    if store.count_flights().await? > 0 {
        info!("Sample data skipped: flights already present");
        return Ok(false);
    }

    for input in sample_flights() {
        store.create_flight(&input).await?;
    }
    for input in sample_bookings() {
        store.create_booking(&input).await?;
    }

    info!("Sample data inserted");
    Ok(true)
}
