//! Test helper module for flight-service integration tests.
//!
//! Applications run on the in-memory backend unless a test asks for
//! PostgreSQL, which needs `TEST_DATABASE_URL`.

#![allow(dead_code)]

use flight_service::config::{
    DatabaseConfig, FlightServiceConfig, StorageBackend, StorageConfig,
};
use flight_service::services::metrics::init_metrics;
use flight_service::services::FlightStore;
use flight_service::startup::Application;
use reqwest::Client;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();
static SCHEMA_COUNTER: AtomicU32 = AtomicU32::new(0);

fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn test_config() -> FlightServiceConfig {
    FlightServiceConfig {
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
            max_connections: 5,
            min_connections: 1,
        },
        seed_sample_data: false,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: Client,
    pub store: Arc<dyn FlightStore>,
}

impl TestApp {
    /// Spawn on a random port with an empty in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    /// Spawn with the sample flights and bookings loaded.
    pub async fn spawn_seeded() -> Self {
        let mut config = test_config();
        config.seed_sample_data = true;
        Self::spawn_with(config).await
    }

    /// Spawn against PostgreSQL in a fresh schema, or `None` without
    /// `TEST_DATABASE_URL`.
    pub async fn spawn_postgres() -> Option<Self> {
        let base_url = std::env::var("TEST_DATABASE_URL").ok()?;
        let counter = SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst);
        let schema_name = format!("test_flight_{}_{}", std::process::id(), counter);

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&base_url)
            .await
            .expect("Failed to connect to test database");
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema_name))
            .execute(&pool)
            .await
            .ok();
        sqlx::query(&format!("CREATE SCHEMA {}", schema_name))
            .execute(&pool)
            .await
            .expect("Failed to create test schema");
        pool.close().await;

        let separator = if base_url.contains('?') { "&" } else { "?" };
        let mut config = test_config();
        config.storage.backend = StorageBackend::Postgres;
        config.database.url = format!(
            "{}{}options=-c search_path%3D{}",
            base_url, separator, schema_name
        );

        Some(Self::spawn_with(config).await)
    }

    pub async fn spawn_with(config: FlightServiceConfig) -> Self {
        init_test_tracing();
        init_metrics();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a flight and return its JSON.
    pub async fn create_flight(&self, body: &Value) -> Value {
        let response = self.post_json("/flights", body).await;
        assert_eq!(response.status().as_u16(), 201, "flight create failed");
        response.json().await.expect("Failed to parse JSON")
    }

    /// Create a booking and return its JSON.
    pub async fn create_booking(&self, body: &Value) -> Value {
        let response = self.post_json("/bookings", body).await;
        assert_eq!(response.status().as_u16(), 201, "booking create failed");
        response.json().await.expect("Failed to parse JSON")
    }
}

pub fn flight_body(flight_number: &str, departure: &str, arrival: &str) -> Value {
    json!({
        "flight_number": flight_number,
        "airline": "Air China",
        "departure_airport": departure,
        "arrival_airport": arrival,
        "departure_time": "08:30:00",
        "arrival_time": "10:45:00",
        "price": "680.00",
        "available_seats": 120,
        "aircraft_type": "Boeing 737"
    })
}

pub fn booking_body(passenger_name: &str) -> Value {
    json!({
        "title": format!("{} business trip", passenger_name),
        "passenger_name": passenger_name,
        "flight_number": "CA1001",
        "departure_date": "2024-07-15",
        "departure_time": "08:30:00",
        "arrival_date": "2024-07-15",
        "arrival_time": "10:45:00",
        "departure_airport": "PEK",
        "arrival_airport": "SHA",
        "seat_number": "12A",
        "price": "680.00"
    })
}
