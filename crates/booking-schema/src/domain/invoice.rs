//! Invoice status

use serde::{Deserialize, Serialize};

use super::SchemaEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Partial,
}

impl InvoiceStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UNPAID" => Some(InvoiceStatus::Unpaid),
            "PAID" => Some(InvoiceStatus::Paid),
            "PARTIAL" => Some(InvoiceStatus::Partial),
            _ => None,
        }
    }
}

impl SchemaEnum for InvoiceStatus {
    const TYPE_NAME: &'static str = "invoice_status";
    const VARIANTS: &'static [Self] = &[InvoiceStatus::Unpaid, InvoiceStatus::Paid, InvoiceStatus::Partial];

    fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "UNPAID",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Partial => "PARTIAL",
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unpaid
    }
}
