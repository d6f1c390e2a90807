//! PostgreSQL store for flight-service.

use super::metrics::QueryTimer;
use super::store::FlightStore;
use crate::models::{
    Booking, CreateBooking, CreateFlight, Flight, Page, Stats, UpdateBooking, UpdateFlight,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::time::Duration;
use tracing::{info, instrument};

const BOOKING_COLUMNS: &str = "id, title, passenger_name, flight_number, departure_date, \
     departure_time, arrival_date, arrival_time, departure_airport, arrival_airport, \
     seat_number, price, status, created_at, updated_at";

const FLIGHT_COLUMNS: &str = "id, flight_number, airline, departure_airport, arrival_airport, \
     departure_time, arrival_time, price, available_seats, aircraft_type, status, \
     created_at, updated_at";

/// Escape `%`, `_` and `\` so a search term matches literally under
/// `LIKE ... ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn db_error(context: &str, e: sqlx::Error) -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("{}: {}", context, e))
}

fn flight_write_error(context: &str, flight_number: &str, e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AppError::Conflict(
            anyhow::anyhow!("Flight number '{}' already exists", flight_number),
        ),
        _ => db_error(context, e),
    }
}

#[derive(FromRow)]
struct StatsRow {
    total_bookings: i64,
    total_flights: i64,
    confirmed_bookings: i64,
    timestamp: DateTime<Utc>,
}

/// Connection pool wrapper implementing [`FlightStore`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new connection pool.
    #[instrument(skip(database_url), fields(service = "flight-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl FlightStore for PgStore {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Health check failed", e))?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Booking Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input), fields(flight_number = %input.flight_number))]
    async fn create_booking(&self, input: &CreateBooking) -> Result<Booking, AppError> {
        let timer = QueryTimer::start("create_booking");

        let sql = format!(
            r#"
            INSERT INTO bookings (title, passenger_name, flight_number, departure_date,
                departure_time, arrival_date, arrival_time, departure_airport,
                arrival_airport, seat_number, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        );
        let booking = sqlx::query_as::<_, Booking>(&sql)
            .bind(&input.title)
            .bind(&input.passenger_name)
            .bind(&input.flight_number)
            .bind(input.departure_date)
            .bind(input.departure_time)
            .bind(input.arrival_date)
            .bind(input.arrival_time)
            .bind(&input.departure_airport)
            .bind(&input.arrival_airport)
            .bind(&input.seat_number)
            .bind(input.price)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create booking", e))?;

        timer.observe_duration();
        info!(booking_id = booking.id, "Booking created");

        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn list_bookings(&self, page: Page) -> Result<Vec<Booking>, AppError> {
        let timer = QueryTimer::start("list_bookings");

        let sql = format!(
            "SELECT {} FROM bookings ORDER BY id OFFSET $1 LIMIT $2",
            BOOKING_COLUMNS
        );
        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list bookings", e))?;

        timer.observe_duration();
        Ok(bookings)
    }

    #[instrument(skip(self))]
    async fn get_booking(&self, id: i64) -> Result<Option<Booking>, AppError> {
        let timer = QueryTimer::start("get_booking");

        let sql = format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS);
        let booking = sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get booking", e))?;

        timer.observe_duration();
        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn search_bookings_by_passenger(&self, name: &str) -> Result<Vec<Booking>, AppError> {
        let timer = QueryTimer::start("search_bookings");

        let sql = format!(
            r#"
            SELECT {} FROM bookings
            WHERE passenger_name ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY id
            "#,
            BOOKING_COLUMNS
        );
        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .bind(escape_like(name))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search bookings", e))?;

        timer.observe_duration();
        Ok(bookings)
    }

    #[instrument(skip(self, update))]
    async fn update_booking(
        &self,
        id: i64,
        update: &UpdateBooking,
    ) -> Result<Option<Booking>, AppError> {
        let timer = QueryTimer::start("update_booking");

        let sql = format!(
            r#"
            UPDATE bookings SET
                title = COALESCE($2, title),
                passenger_name = COALESCE($3, passenger_name),
                flight_number = COALESCE($4, flight_number),
                departure_date = COALESCE($5, departure_date),
                departure_time = COALESCE($6, departure_time),
                arrival_date = COALESCE($7, arrival_date),
                arrival_time = COALESCE($8, arrival_time),
                departure_airport = COALESCE($9, departure_airport),
                arrival_airport = COALESCE($10, arrival_airport),
                seat_number = CASE WHEN $11 THEN $12 ELSE seat_number END,
                price = COALESCE($13, price),
                status = COALESCE($14, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        );
        let booking = sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .bind(&update.title)
            .bind(&update.passenger_name)
            .bind(&update.flight_number)
            .bind(update.departure_date)
            .bind(update.departure_time)
            .bind(update.arrival_date)
            .bind(update.arrival_time)
            .bind(&update.departure_airport)
            .bind(&update.arrival_airport)
            .bind(update.seat_number.is_some())
            .bind(update.seat_number.clone().flatten())
            .bind(update.price)
            .bind(&update.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update booking", e))?;

        timer.observe_duration();
        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn delete_booking(&self, id: i64) -> Result<bool, AppError> {
        let timer = QueryTimer::start("delete_booking");

        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete booking", e))?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // Flight Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input), fields(flight_number = %input.flight_number))]
    async fn create_flight(&self, input: &CreateFlight) -> Result<Flight, AppError> {
        let timer = QueryTimer::start("create_flight");

        let sql = format!(
            r#"
            INSERT INTO flights (flight_number, airline, departure_airport, arrival_airport,
                departure_time, arrival_time, price, available_seats, aircraft_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            FLIGHT_COLUMNS
        );
        let flight = sqlx::query_as::<_, Flight>(&sql)
            .bind(&input.flight_number)
            .bind(&input.airline)
            .bind(&input.departure_airport)
            .bind(&input.arrival_airport)
            .bind(input.departure_time)
            .bind(input.arrival_time)
            .bind(input.price)
            .bind(input.available_seats)
            .bind(&input.aircraft_type)
            .bind(&input.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| flight_write_error("Failed to create flight", &input.flight_number, e))?;

        timer.observe_duration();
        info!(flight_id = flight.id, "Flight created");

        Ok(flight)
    }

    #[instrument(skip(self))]
    async fn list_active_flights(&self, page: Page) -> Result<Vec<Flight>, AppError> {
        let timer = QueryTimer::start("list_flights");

        let sql = format!(
            "SELECT {} FROM flights WHERE status = 'active' ORDER BY id OFFSET $1 LIMIT $2",
            FLIGHT_COLUMNS
        );
        let flights = sqlx::query_as::<_, Flight>(&sql)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list flights", e))?;

        timer.observe_duration();
        Ok(flights)
    }

    #[instrument(skip(self))]
    async fn get_flight(&self, id: i64) -> Result<Option<Flight>, AppError> {
        let timer = QueryTimer::start("get_flight");

        let sql = format!("SELECT {} FROM flights WHERE id = $1", FLIGHT_COLUMNS);
        let flight = sqlx::query_as::<_, Flight>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get flight", e))?;

        timer.observe_duration();
        Ok(flight)
    }

    #[instrument(skip(self))]
    async fn get_flight_by_number(
        &self,
        flight_number: &str,
    ) -> Result<Option<Flight>, AppError> {
        let timer = QueryTimer::start("get_flight_by_number");

        let sql = format!(
            "SELECT {} FROM flights WHERE flight_number = $1",
            FLIGHT_COLUMNS
        );
        let flight = sqlx::query_as::<_, Flight>(&sql)
            .bind(flight_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get flight", e))?;

        timer.observe_duration();
        Ok(flight)
    }

    #[instrument(skip(self))]
    async fn search_flights(
        &self,
        departure: &str,
        arrival: &str,
    ) -> Result<Vec<Flight>, AppError> {
        let timer = QueryTimer::start("search_flights");

        let sql = format!(
            r#"
            SELECT {} FROM flights
            WHERE departure_airport ILIKE '%' || $1 || '%' ESCAPE '\'
              AND arrival_airport ILIKE '%' || $2 || '%' ESCAPE '\'
              AND status = 'active'
            ORDER BY id
            "#,
            FLIGHT_COLUMNS
        );
        let flights = sqlx::query_as::<_, Flight>(&sql)
            .bind(escape_like(departure))
            .bind(escape_like(arrival))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search flights", e))?;

        timer.observe_duration();
        Ok(flights)
    }

    #[instrument(skip(self, update))]
    async fn update_flight(
        &self,
        id: i64,
        update: &UpdateFlight,
    ) -> Result<Option<Flight>, AppError> {
        let timer = QueryTimer::start("update_flight");

        let sql = format!(
            r#"
            UPDATE flights SET
                flight_number = COALESCE($2, flight_number),
                airline = COALESCE($3, airline),
                departure_airport = COALESCE($4, departure_airport),
                arrival_airport = COALESCE($5, arrival_airport),
                departure_time = COALESCE($6, departure_time),
                arrival_time = COALESCE($7, arrival_time),
                price = COALESCE($8, price),
                available_seats = COALESCE($9, available_seats),
                aircraft_type = CASE WHEN $10 THEN $11 ELSE aircraft_type END,
                status = COALESCE($12, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            FLIGHT_COLUMNS
        );
        let number = update.flight_number.clone().unwrap_or_default();
        let flight = sqlx::query_as::<_, Flight>(&sql)
            .bind(id)
            .bind(&update.flight_number)
            .bind(&update.airline)
            .bind(&update.departure_airport)
            .bind(&update.arrival_airport)
            .bind(update.departure_time)
            .bind(update.arrival_time)
            .bind(update.price)
            .bind(update.available_seats)
            .bind(update.aircraft_type.is_some())
            .bind(update.aircraft_type.clone().flatten())
            .bind(&update.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| flight_write_error("Failed to update flight", &number, e))?;

        timer.observe_duration();
        Ok(flight)
    }

    #[instrument(skip(self))]
    async fn delete_flight(&self, id: i64) -> Result<bool, AppError> {
        let timer = QueryTimer::start("delete_flight");

        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete flight", e))?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_flights(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flights")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count flights", e))?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<Stats, AppError> {
        let timer = QueryTimer::start("stats");

        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM bookings) AS total_bookings,
                (SELECT COUNT(*) FROM flights WHERE status = 'active') AS total_flights,
                (SELECT COUNT(*) FROM bookings WHERE status = 'confirmed') AS confirmed_bookings,
                NOW() AS timestamp
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute stats", e))?;

        timer.observe_duration();

        Ok(Stats {
            total_bookings: row.total_bookings,
            total_flights: row.total_flights,
            confirmed_bookings: row.confirmed_bookings,
            timestamp: row.timestamp,
        })
    }
}
