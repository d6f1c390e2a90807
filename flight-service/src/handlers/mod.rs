pub mod bookings;
pub mod flights;
pub mod health;
pub mod stats;

pub use bookings::{
    create_booking, delete_booking, get_booking, list_bookings, search_bookings, update_booking,
};
pub use flights::{
    create_flight, delete_flight, get_flight, get_flight_by_number, list_flights, search_flights,
    update_flight,
};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use stats::get_stats;
