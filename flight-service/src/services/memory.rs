//! In-memory store for local runs and tests.

use super::store::FlightStore;
use crate::models::{
    normalize_price, Booking, CreateBooking, CreateFlight, Flight, Page, Stats, UpdateBooking,
    UpdateFlight, BOOKING_STATUS_CONFIRMED,
};
use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    flights: BTreeMap<i64, Flight>,
    bookings: BTreeMap<i64, Booking>,
    last_flight_id: i64,
    last_booking_id: i64,
}

impl Tables {
    fn flight_number_taken(&self, flight_number: &str, except_id: Option<i64>) -> bool {
        self.flights
            .values()
            .any(|f| f.flight_number == flight_number && Some(f.id) != except_id)
    }
}

/// Process-local store with the same semantics as the PostgreSQL backend.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn window<T: Clone>(items: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    let skip = usize::try_from(page.skip).unwrap_or(0);
    let limit = usize::try_from(page.limit).unwrap_or(0);
    items.skip(skip).take(limit).collect()
}

fn duplicate_flight(flight_number: &str) -> AppError {
    AppError::Conflict(anyhow::anyhow!(
        "Flight number '{}' already exists",
        flight_number
    ))
}

#[async_trait]
impl FlightStore for MemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_booking(&self, input: &CreateBooking) -> Result<Booking, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_booking_id += 1;
        let now = Utc::now();

        let booking = Booking {
            id: tables.last_booking_id,
            title: input.title.clone(),
            passenger_name: input.passenger_name.clone(),
            flight_number: input.flight_number.clone(),
            departure_date: input.departure_date,
            departure_time: input.departure_time,
            arrival_date: input.arrival_date,
            arrival_time: input.arrival_time,
            departure_airport: input.departure_airport.clone(),
            arrival_airport: input.arrival_airport.clone(),
            seat_number: input.seat_number.clone(),
            price: normalize_price(input.price),
            status: BOOKING_STATUS_CONFIRMED.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.bookings.insert(booking.id, booking.clone());

        Ok(booking)
    }

    async fn list_bookings(&self, page: Page) -> Result<Vec<Booking>, AppError> {
        let tables = self.tables.read().await;
        Ok(window(tables.bookings.values().cloned(), page))
    }

    async fn get_booking(&self, id: i64) -> Result<Option<Booking>, AppError> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn search_bookings_by_passenger(&self, name: &str) -> Result<Vec<Booking>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .values()
            .filter(|b| contains_ignore_case(&b.passenger_name, name))
            .cloned()
            .collect())
    }

    async fn update_booking(
        &self,
        id: i64,
        update: &UpdateBooking,
    ) -> Result<Option<Booking>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(booking) = tables.bookings.get_mut(&id) else {
            return Ok(None);
        };

        booking.apply(update);
        booking.updated_at = Utc::now();

        Ok(Some(booking.clone()))
    }

    async fn delete_booking(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.bookings.remove(&id).is_some())
    }

    async fn create_flight(&self, input: &CreateFlight) -> Result<Flight, AppError> {
        let mut tables = self.tables.write().await;
        if tables.flight_number_taken(&input.flight_number, None) {
            return Err(duplicate_flight(&input.flight_number));
        }

        tables.last_flight_id += 1;
        let now = Utc::now();

        let flight = Flight {
            id: tables.last_flight_id,
            flight_number: input.flight_number.clone(),
            airline: input.airline.clone(),
            departure_airport: input.departure_airport.clone(),
            arrival_airport: input.arrival_airport.clone(),
            departure_time: input.departure_time,
            arrival_time: input.arrival_time,
            price: normalize_price(input.price),
            available_seats: input.available_seats,
            aircraft_type: input.aircraft_type.clone(),
            status: input.status.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.flights.insert(flight.id, flight.clone());

        Ok(flight)
    }

    async fn list_active_flights(&self, page: Page) -> Result<Vec<Flight>, AppError> {
        let tables = self.tables.read().await;
        Ok(window(
            tables.flights.values().filter(|f| f.is_active()).cloned(),
            page,
        ))
    }

    async fn get_flight(&self, id: i64) -> Result<Option<Flight>, AppError> {
        Ok(self.tables.read().await.flights.get(&id).cloned())
    }

    async fn get_flight_by_number(
        &self,
        flight_number: &str,
    ) -> Result<Option<Flight>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .flights
            .values()
            .find(|f| f.flight_number == flight_number)
            .cloned())
    }

    async fn search_flights(
        &self,
        departure: &str,
        arrival: &str,
    ) -> Result<Vec<Flight>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .flights
            .values()
            .filter(|f| {
                f.is_active()
                    && contains_ignore_case(&f.departure_airport, departure)
                    && contains_ignore_case(&f.arrival_airport, arrival)
            })
            .cloned()
            .collect())
    }

    async fn update_flight(
        &self,
        id: i64,
        update: &UpdateFlight,
    ) -> Result<Option<Flight>, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.flights.contains_key(&id) {
            return Ok(None);
        }
        if let Some(number) = &update.flight_number {
            if tables.flight_number_taken(number, Some(id)) {
                return Err(duplicate_flight(number));
            }
        }

        let Some(flight) = tables.flights.get_mut(&id) else {
            return Ok(None);
        };
        flight.apply(update);
        flight.updated_at = Utc::now();

        Ok(Some(flight.clone()))
    }

    async fn delete_flight(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.flights.remove(&id).is_some())
    }

    async fn count_flights(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.flights.len() as i64)
    }

    async fn stats(&self) -> Result<Stats, AppError> {
        let tables = self.tables.read().await;
        Ok(Stats {
            total_bookings: tables.bookings.len() as i64,
            total_flights: tables.flights.values().filter(|f| f.is_active()).count() as i64,
            confirmed_bookings: tables.bookings.values().filter(|b| b.is_confirmed()).count()
                as i64,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    fn flight(number: &str, from: &str, to: &str, status: &str) -> CreateFlight {
        CreateFlight {
            flight_number: number.to_string(),
            airline: "Test Air".to_string(),
            departure_airport: from.to_string(),
            arrival_airport: to.to_string(),
            departure_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            price: Decimal::from(500),
            available_seats: 10,
            aircraft_type: None,
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let store = MemoryStore::new();
        let a = store.create_flight(&flight("T1", "PEK", "SHA", "active")).await.unwrap();
        let b = store.create_flight(&flight("T2", "PEK", "SHA", "active")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn duplicate_flight_number_conflicts() {
        let store = MemoryStore::new();
        store.create_flight(&flight("T1", "PEK", "SHA", "active")).await.unwrap();

        let err = store
            .create_flight(&flight("T1", "CAN", "CTU", "active"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn renaming_to_taken_number_conflicts() {
        let store = MemoryStore::new();
        store.create_flight(&flight("T1", "PEK", "SHA", "active")).await.unwrap();
        let second = store.create_flight(&flight("T2", "PEK", "SHA", "active")).await.unwrap();

        let update = UpdateFlight {
            flight_number: Some("T1".to_string()),
            ..Default::default()
        };
        let err = store.update_flight(second.id, &update).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let same = UpdateFlight {
            flight_number: Some("T2".to_string()),
            ..Default::default()
        };
        assert!(store.update_flight(second.id, &same).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring_over_active_flights() {
        let store = MemoryStore::new();
        store.create_flight(&flight("T1", "PEK", "SHA", "active")).await.unwrap();
        store.create_flight(&flight("T2", "PEK", "SHA", "cancelled")).await.unwrap();
        store.create_flight(&flight("T3", "PVG", "SHA", "active")).await.unwrap();

        let found = store.search_flights("pe", "sh").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].flight_number, "T1");

        let found = store.search_flights("P", "").await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let store = MemoryStore::new();
        store.create_flight(&flight("T1", "PEK", "SHA", "active")).await.unwrap();
        assert!(store.search_flights("%", "%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_active_flights_respects_window() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create_flight(&flight(&format!("T{}", i), "PEK", "SHA", "active"))
                .await
                .unwrap();
        }
        store.create_flight(&flight("X", "PEK", "SHA", "inactive")).await.unwrap();

        let page = store.list_active_flights(Page::new(1, 2)).await.unwrap();
        let numbers: Vec<_> = page.iter().map(|f| f.flight_number.as_str()).collect();
        assert_eq!(numbers, vec!["T1", "T2"]);

        assert_eq!(store.count_flights().await.unwrap(), 6);
        assert_eq!(store.stats().await.unwrap().total_flights, 5);
    }

    #[tokio::test]
    async fn missing_records_are_reported_as_absent() {
        let store = MemoryStore::new();
        assert!(store.get_booking(42).await.unwrap().is_none());
        assert!(!store.delete_booking(42).await.unwrap());
        assert!(store
            .update_booking(42, &UpdateBooking::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_flight(42).await.unwrap());
    }
}
