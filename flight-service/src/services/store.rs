//! Storage abstraction shared by the PostgreSQL and in-memory backends.

use crate::models::{
    Booking, CreateBooking, CreateFlight, Flight, Page, Stats, UpdateBooking, UpdateFlight,
};
use async_trait::async_trait;
use service_core::error::AppError;

/// Persistence for flights and bookings.
///
/// Lookups return `Ok(None)` (or `Ok(false)` for deletes) when the record does
/// not exist; handlers turn that into a 404. Substring searches are
/// case-insensitive and treat the term literally.
#[async_trait]
pub trait FlightStore: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    async fn create_booking(&self, input: &CreateBooking) -> Result<Booking, AppError>;
    /// All bookings ordered by id.
    async fn list_bookings(&self, page: Page) -> Result<Vec<Booking>, AppError>;
    async fn get_booking(&self, id: i64) -> Result<Option<Booking>, AppError>;
    async fn search_bookings_by_passenger(&self, name: &str) -> Result<Vec<Booking>, AppError>;
    async fn update_booking(
        &self,
        id: i64,
        update: &UpdateBooking,
    ) -> Result<Option<Booking>, AppError>;
    async fn delete_booking(&self, id: i64) -> Result<bool, AppError>;

    /// Fails with `AppError::Conflict` when the flight number is taken.
    async fn create_flight(&self, input: &CreateFlight) -> Result<Flight, AppError>;
    /// Active flights ordered by id.
    async fn list_active_flights(&self, page: Page) -> Result<Vec<Flight>, AppError>;
    async fn get_flight(&self, id: i64) -> Result<Option<Flight>, AppError>;
    async fn get_flight_by_number(&self, flight_number: &str)
        -> Result<Option<Flight>, AppError>;
    /// Active flights whose airports contain `departure` and `arrival`.
    async fn search_flights(&self, departure: &str, arrival: &str)
        -> Result<Vec<Flight>, AppError>;
    async fn update_flight(
        &self,
        id: i64,
        update: &UpdateFlight,
    ) -> Result<Option<Flight>, AppError>;
    async fn delete_flight(&self, id: i64) -> Result<bool, AppError>;
    /// Flights of any status.
    async fn count_flights(&self) -> Result<i64, AppError>;

    async fn stats(&self) -> Result<Stats, AppError>;
}
