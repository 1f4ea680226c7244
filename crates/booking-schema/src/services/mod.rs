//! Schema services

pub mod initializer;
pub mod verifier;

pub use initializer::{InitReport, SchemaInitializer};
pub use verifier::verify_schema;
