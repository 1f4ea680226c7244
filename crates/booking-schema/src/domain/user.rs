// ============================================================================
// Booking Schema - User Role
// File: crates/booking-schema/src/domain/user.rs
// ============================================================================

use serde::{Deserialize, Serialize};

use super::SchemaEnum;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Staff,
    Customer,
}

impl UserRole {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SUPER_ADMIN" => Some(UserRole::SuperAdmin),
            "ADMIN" => Some(UserRole::Admin),
            "STAFF" => Some(UserRole::Staff),
            "CUSTOMER" => Some(UserRole::Customer),
            _ => None,
        }
    }
}

impl SchemaEnum for UserRole {
    const TYPE_NAME: &'static str = "user_role";
    const VARIANTS: &'static [Self] = &[
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Staff,
        UserRole::Customer,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "SUPER_ADMIN",
            UserRole::Admin => "ADMIN",
            UserRole::Staff => "STAFF",
            UserRole::Customer => "CUSTOMER",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}
