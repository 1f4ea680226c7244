//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod error;
pub mod postgres;

pub use connection::create_pool;
pub use error::db_failure;
pub use postgres::{PgConnectionProvider, PgSchemaInspector, PgSchemaSession};
