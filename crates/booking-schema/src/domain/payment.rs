// ============================================================================
// Booking Schema - Payment Enums
// File: crates/booking-schema/src/domain/payment.rs
// Description: Payment lifecycle status and accepted payment methods
// ============================================================================

use serde::{Deserialize, Serialize};

use super::SchemaEnum;

/// Payment status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Initiated,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "INITIATED" => Some(PaymentStatus::Initiated),
            "PAID" => Some(PaymentStatus::Paid),
            "FAILED" => Some(PaymentStatus::Failed),
            "REFUNDED" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl SchemaEnum for PaymentStatus {
    const TYPE_NAME: &'static str = "payment_status";
    const VARIANTS: &'static [Self] = &[
        PaymentStatus::Initiated,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Initiated => "INITIATED",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Initiated
    }
}

/// Payment method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Cash,
    Bank,
}

impl PaymentMethod {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CARD" => Some(PaymentMethod::Card),
            "CASH" => Some(PaymentMethod::Cash),
            "BANK" => Some(PaymentMethod::Bank),
            _ => None,
        }
    }
}

impl SchemaEnum for PaymentMethod {
    const TYPE_NAME: &'static str = "payment_method";
    const VARIANTS: &'static [Self] = &[PaymentMethod::Card, PaymentMethod::Cash, PaymentMethod::Bank];

    fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Bank => "BANK",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card
    }
}
