//! Ports implemented by database adapters

pub mod connection;
pub mod inspector;

pub use connection::{ConnectionProvider, SchemaSession};
pub use inspector::SchemaInspector;
