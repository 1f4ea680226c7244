//! # Booking Shared
//! 
//! Configuration, telemetry, and shared error types for the booking schema tools.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
