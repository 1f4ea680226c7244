// ============================================================================
// Booking Schema - Catalog
// File: crates/booking-schema/src/schema/catalog.rs
// Description: The multi-tenant booking/payments schema, in creation order
// ============================================================================

use super::plan::SchemaPlan;
use super::statement::{ColumnDef, OnDelete, SchemaStatement, TableDef};
use crate::domain::{
    BookingStatus, CompanyStatus, InvoiceStatus, PaymentMethod, PaymentStatus, SchemaEnum, UserRole,
};

pub const EXTENSIONS: &[&str] = &["uuid-ossp"];

pub const ENUM_TYPES: &[&str] = &[
    CompanyStatus::TYPE_NAME,
    UserRole::TYPE_NAME,
    BookingStatus::TYPE_NAME,
    PaymentStatus::TYPE_NAME,
    PaymentMethod::TYPE_NAME,
    InvoiceStatus::TYPE_NAME,
];

/// Tables in foreign-key dependency order.
pub const TABLES: &[&str] = &["companies", "users", "bookings", "payments", "invoices", "audit_logs"];

pub const INDEXES: &[&str] = &[
    "idx_users_company_id",
    "idx_bookings_company_id",
    "idx_bookings_status",
    "idx_payments_booking_id",
    "idx_audit_logs_company_id",
];

/// Full booking schema: extensions, enum types, tables, then indexes.
pub fn booking_schema() -> SchemaPlan {
    SchemaPlan::default()
        .push(SchemaStatement::extension("uuid-ossp"))
        .push(SchemaStatement::enum_of::<CompanyStatus>())
        .push(SchemaStatement::enum_of::<UserRole>())
        .push(SchemaStatement::enum_of::<BookingStatus>())
        .push(SchemaStatement::enum_of::<PaymentStatus>())
        .push(SchemaStatement::enum_of::<PaymentMethod>())
        .push(SchemaStatement::enum_of::<InvoiceStatus>())
        .push(companies())
        .push(users())
        .push(bookings())
        .push(payments())
        .push(invoices())
        .push(audit_logs())
        .push(SchemaStatement::index("idx_users_company_id", "users", ["company_id"]))
        .push(SchemaStatement::index("idx_bookings_company_id", "bookings", ["company_id"]))
        .push(SchemaStatement::index("idx_bookings_status", "bookings", ["status"]))
        .push(SchemaStatement::index("idx_payments_booking_id", "payments", ["booking_id"]))
        .push(SchemaStatement::index("idx_audit_logs_company_id", "audit_logs", ["company_id"]))
}

fn id() -> ColumnDef {
    ColumnDef::new("id", "UUID").primary_key().default_expr("uuid_generate_v4()")
}

fn tenant() -> ColumnDef {
    ColumnDef::new("company_id", "UUID")
        .not_null()
        .references("companies", "id", OnDelete::Cascade)
}

fn timestamp_now(name: &str) -> ColumnDef {
    ColumnDef::new(name, "TIMESTAMP").default_expr("NOW()")
}

fn companies() -> SchemaStatement {
    SchemaStatement::table(
        "companies",
        TableDef::default()
            .column(id())
            .column(ColumnDef::new("name", "VARCHAR(255)").not_null())
            .column(
                ColumnDef::enumerated::<CompanyStatus>("status")
                    .not_null()
                    .default_label(CompanyStatus::default()),
            )
            .column(timestamp_now("created_at"))
            .column(timestamp_now("updated_at"))
            .column(ColumnDef::new("deleted_at", "TIMESTAMP")),
    )
}

fn users() -> SchemaStatement {
    SchemaStatement::table(
        "users",
        TableDef::default()
            .column(id())
            .column(tenant())
            .column(ColumnDef::new("name", "VARCHAR(150)").not_null())
            .column(ColumnDef::new("email", "VARCHAR(150)").unique().not_null())
            .column(ColumnDef::new("password_hash", "TEXT").not_null())
            .column(
                ColumnDef::enumerated::<UserRole>("role")
                    .not_null()
                    .default_label(UserRole::default()),
            )
            .column(ColumnDef::new("is_active", "BOOLEAN").default_expr("true"))
            .column(timestamp_now("created_at"))
            .column(timestamp_now("updated_at"))
            .column(ColumnDef::new("deleted_at", "TIMESTAMP")),
    )
}

fn bookings() -> SchemaStatement {
    SchemaStatement::table(
        "bookings",
        TableDef::default()
            .column(id())
            .column(tenant())
            .column(
                ColumnDef::new("created_by", "UUID")
                    .not_null()
                    .references("users", "id", OnDelete::NoAction),
            )
            .column(ColumnDef::new("customer_name", "VARCHAR(150)").not_null())
            .column(ColumnDef::new("service_name", "VARCHAR(150)").not_null())
            .column(ColumnDef::new("start_time", "TIMESTAMP").not_null())
            .column(ColumnDef::new("end_time", "TIMESTAMP").not_null())
            .column(
                ColumnDef::enumerated::<BookingStatus>("status")
                    .not_null()
                    .default_label(BookingStatus::default()),
            )
            .column(ColumnDef::new("total_price", "NUMERIC(10,2)").not_null())
            .column(timestamp_now("created_at"))
            .column(timestamp_now("updated_at"))
            .column(ColumnDef::new("deleted_at", "TIMESTAMP"))
            .check("booking_time_check", "end_time > start_time"),
    )
}

fn payments() -> SchemaStatement {
    SchemaStatement::table(
        "payments",
        TableDef::default()
            .column(id())
            .column(tenant())
            .column(
                ColumnDef::new("booking_id", "UUID")
                    .not_null()
                    .references("bookings", "id", OnDelete::Cascade),
            )
            .column(ColumnDef::new("amount", "NUMERIC(10,2)").not_null())
            .column(ColumnDef::enumerated::<PaymentMethod>("payment_method").not_null())
            .column(
                ColumnDef::enumerated::<PaymentStatus>("status")
                    .not_null()
                    .default_label(PaymentStatus::default()),
            )
            .column(ColumnDef::new("transaction_reference", "VARCHAR(255)"))
            .column(timestamp_now("created_at"))
            .column(timestamp_now("updated_at")),
    )
}

fn invoices() -> SchemaStatement {
    SchemaStatement::table(
        "invoices",
        TableDef::default()
            .column(id())
            .column(tenant())
            .column(
                ColumnDef::new("booking_id", "UUID")
                    .unique()
                    .not_null()
                    .references("bookings", "id", OnDelete::Cascade),
            )
            .column(ColumnDef::new("invoice_number", "VARCHAR(100)").unique().not_null())
            .column(ColumnDef::new("total_amount", "NUMERIC(10,2)").not_null())
            .column(
                ColumnDef::enumerated::<InvoiceStatus>("status")
                    .not_null()
                    .default_label(InvoiceStatus::default()),
            )
            .column(timestamp_now("issued_at")),
    )
}

fn audit_logs() -> SchemaStatement {
    SchemaStatement::table(
        "audit_logs",
        TableDef::default()
            .column(id())
            .column(tenant())
            .column(ColumnDef::new("user_id", "UUID").references("users", "id", OnDelete::NoAction))
            .column(ColumnDef::new("action", "VARCHAR(100)").not_null())
            .column(ColumnDef::new("entity", "VARCHAR(100)").not_null())
            .column(ColumnDef::new("entity_id", "UUID"))
            .column(ColumnDef::new("old_value", "JSONB"))
            .column(ColumnDef::new("new_value", "JSONB"))
            .column(timestamp_now("created_at")),
    )
}
