// ============================================================================
// Booking Schema - Company Status
// File: crates/booking-schema/src/domain/company.rs
// Description: Tenant lifecycle status
// ============================================================================

use serde::{Deserialize, Serialize};

use super::SchemaEnum;

/// Company (tenant) status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyStatus {
    Active,
    Inactive,
}

impl CompanyStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(CompanyStatus::Active),
            "INACTIVE" => Some(CompanyStatus::Inactive),
            _ => None,
        }
    }
}

impl SchemaEnum for CompanyStatus {
    const TYPE_NAME: &'static str = "company_status";
    const VARIANTS: &'static [Self] = &[CompanyStatus::Active, CompanyStatus::Inactive];

    fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Active => "ACTIVE",
            CompanyStatus::Inactive => "INACTIVE",
        }
    }
}

impl Default for CompanyStatus {
    fn default() -> Self {
        CompanyStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_postgres_enum() {
        assert_eq!(CompanyStatus::labels(), vec!["ACTIVE", "INACTIVE"]);
        assert_eq!(CompanyStatus::from_str("INACTIVE"), Some(CompanyStatus::Inactive));
        assert_eq!(CompanyStatus::from_str("inactive"), None);
    }
}
