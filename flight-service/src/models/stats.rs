use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate counters returned by `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_bookings: i64,
    /// Active flights only.
    pub total_flights: i64,
    pub confirmed_bookings: i64,
    pub timestamp: DateTime<Utc>,
}
