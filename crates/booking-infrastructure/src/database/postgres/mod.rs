//! PostgreSQL port implementations

pub mod session;
pub mod inspector;

pub use session::{PgConnectionProvider, PgSchemaSession};
pub use inspector::PgSchemaInspector;
