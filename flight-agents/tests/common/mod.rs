//! Spawns flight-service on the in-memory backend for agent tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use flight_agents::models::{NewBooking, NewFlight};
use flight_agents::{AirlineAgent, BookingAgent, McpClient};
use flight_service::config::{
    DatabaseConfig, FlightServiceConfig, StorageBackend, StorageConfig,
};
use flight_service::startup::Application;
use rust_decimal::Decimal;
use service_core::config::Config as CoreConfig;

pub struct TestServer {
    pub address: String,
}

impl TestServer {
    pub async fn spawn() -> Self {
        Self::spawn_with_seed(false).await
    }

    pub async fn spawn_seeded() -> Self {
        Self::spawn_with_seed(true).await
    }

    async fn spawn_with_seed(seed_sample_data: bool) -> Self {
        let config = FlightServiceConfig {
            common: CoreConfig { port: 0 },
            host: "127.0.0.1".to_string(),
            service_name: "flight-service".to_string(),
            service_version: "0.1.0".to_string(),
            log_level: "warn".to_string(),
            otlp_endpoint: None,
            storage: StorageConfig {
                backend: StorageBackend::Memory,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 1,
                min_connections: 1,
            },
            seed_sample_data,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build flight-service");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = McpClient::new(address.clone());
        for _ in 0..50 {
            if client.health().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestServer { address }
    }

    pub fn client(&self) -> McpClient {
        McpClient::new(self.address.clone())
    }

    pub fn booking_agent(&self) -> BookingAgent {
        BookingAgent::new(self.client())
    }

    pub fn airline_agent(&self) -> AirlineAgent {
        AirlineAgent::new(self.client())
    }
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn new_booking(passenger_name: &str) -> NewBooking {
    NewBooking {
        title: format!("{} trip", passenger_name),
        passenger_name: passenger_name.to_string(),
        flight_number: "CA1001".to_string(),
        departure_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        departure_time: at(8, 30),
        arrival_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        arrival_time: at(10, 45),
        departure_airport: "PEK".to_string(),
        arrival_airport: "SHA".to_string(),
        seat_number: Some("12A".to_string()),
        price: Decimal::new(68000, 2),
    }
}

pub fn new_flight(
    flight_number: &str,
    departure: &str,
    arrival: &str,
    price_cents: i64,
) -> NewFlight {
    NewFlight {
        flight_number: flight_number.to_string(),
        airline: "Air China".to_string(),
        departure_airport: departure.to_string(),
        arrival_airport: arrival.to_string(),
        departure_time: at(8, 30),
        arrival_time: at(10, 45),
        price: Decimal::new(price_cents, 2),
        available_seats: 100,
        aircraft_type: Some("Boeing 737".to_string()),
        status: None,
    }
}
