//! # Booking Infrastructure
//! 
//! PostgreSQL adapters for the booking schema ports.

pub mod database;

pub use database::{create_pool, PgConnectionProvider, PgSchemaInspector, PgSchemaSession};
