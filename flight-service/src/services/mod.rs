pub mod memory;
pub mod metrics;
pub mod postgres;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::FlightStore;
