//! # Booking Schema
//! 
//! Domain enums, schema-statement descriptors, the booking catalog,
//! connection ports and the schema initializer service.

pub mod domain;
pub mod schema;
pub mod ports;
pub mod services;
pub mod error;

// Re-export domain enums and the main entry points
pub use domain::*;
pub use error::{DbFailure, PlanError, SchemaError};
pub use schema::{catalog, SchemaPlan, SchemaStatement};
pub use services::{verify_schema, InitReport, SchemaInitializer};
