use crate::config::{FlightServiceConfig, StorageBackend};
use crate::handlers;
use crate::services::{seed, FlightStore, MemoryStore, PgStore};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::IntoFuture;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: FlightServiceConfig,
    pub store: Arc<dyn FlightStore>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

async fn connect_store(config: &FlightServiceConfig) -> Result<Arc<dyn FlightStore>, AppError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let db = PgStore::new(
                &config.database.url,
                config.database.max_connections,
                config.database.min_connections,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to PostgreSQL: {}", e);
                e
            })?;
            db.run_migrations().await.map_err(|e| {
                tracing::error!("Failed to run database migrations: {}", e);
                e
            })?;
            Ok(Arc::new(db))
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/bookings",
            post(handlers::create_booking).get(handlers::list_bookings),
        )
        .route(
            "/bookings/search/:passenger_name",
            get(handlers::search_bookings),
        )
        .route(
            "/bookings/:id",
            get(handlers::get_booking)
                .put(handlers::update_booking)
                .delete(handlers::delete_booking),
        )
        .route(
            "/flights",
            post(handlers::create_flight).get(handlers::list_flights),
        )
        .route(
            "/flights/search/:departure/:arrival",
            get(handlers::search_flights),
        )
        .route(
            "/flights/number/:flight_number",
            get(handlers::get_flight_by_number),
        )
        .route(
            "/flights/:id",
            get(handlers::get_flight)
                .put(handlers::update_flight)
                .delete(handlers::delete_flight),
        )
        .route("/stats", get(handlers::get_stats))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
}

impl Application {
    pub async fn build(config: FlightServiceConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;

        if config.seed_sample_data {
            seed::seed_if_empty(store.as_ref()).await.map_err(|e| {
                tracing::error!("Failed to seed sample data: {}", e);
                e
            })?;
        }

        let state = AppState {
            config: config.clone(),
            store,
        };

        let app = router(state.clone());

        let host: IpAddr = config.host.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid host '{}': {}", config.host, e))
        })?;
        let addr = SocketAddr::from((host, config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port = port,
            backend = ?config.storage.backend,
            "flight-service listening"
        );

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> Arc<dyn FlightStore> {
        self.state.store.clone()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
