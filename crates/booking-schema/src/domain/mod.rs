//! # Booking Schema - Domain Module
//! 
//! Enumerated column types of the booking application. Each enum maps 1:1
//! onto a Postgres `ENUM` type declared by the catalog.

pub mod company;
pub mod user;
pub mod booking;
pub mod payment;
pub mod invoice;

pub use company::CompanyStatus;
pub use user::UserRole;
pub use booking::BookingStatus;
pub use payment::{PaymentMethod, PaymentStatus};
pub use invoice::InvoiceStatus;

/// A Rust enum persisted as a Postgres enumerated type.
pub trait SchemaEnum: Copy + 'static {
    /// Postgres type name.
    const TYPE_NAME: &'static str;
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn labels() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.as_str()).collect()
    }
}
