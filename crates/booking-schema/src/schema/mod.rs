//! Declarative schema: statement descriptors, ordered plans, Postgres rendering
//! and the booking catalog.

pub mod statement;
pub mod plan;
pub mod render;
pub mod catalog;
pub mod snapshot;

pub use statement::{
    CheckConstraint, ColumnDef, Definition, ForeignKey, ObjectKind, OnDelete, SchemaStatement,
    TableDef,
};
pub use plan::SchemaPlan;
pub use snapshot::{MissingObject, SchemaSnapshot};
