//! Client-side agents for flight-service.
//!
//! [`BookingAgent`] manages passenger bookings and [`AirlineAgent`] searches
//! and maintains flights. Both are thin wrappers over [`McpClient`].

pub mod airline;
pub mod booking;
pub mod client;
pub mod config;
pub mod error;
pub mod intent;
pub mod models;
pub mod render;

pub use airline::AirlineAgent;
pub use booking::BookingAgent;
pub use client::McpClient;
pub use config::AgentConfig;
pub use error::AgentError;
pub use intent::Intent;
