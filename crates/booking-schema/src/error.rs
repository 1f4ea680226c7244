//! Schema errors

use thiserror::Error;

use crate::schema::ObjectKind;

/// SQLSTATE codes meaning "the object is already there".
///
/// `23505` shows up when two sessions race on the system catalogs
/// (e.g. `pg_type_typname_nsp_index`) while both create the same object.
pub const ALREADY_EXISTS_SQLSTATES: &[&str] = &[
    "42710", // duplicate_object
    "42P07", // duplicate_table (tables and indexes)
    "42P06", // duplicate_schema
    "23505", // unique_violation on catalog rows
];

/// Store-agnostic description of a failed database call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DbFailure {
    pub code: Option<String>,
    pub message: String,
}

impl DbFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into() }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: Some(code.into()), message: message.into() }
    }

    pub fn is_already_exists(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| ALREADY_EXISTS_SQLSTATES.contains(&code))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: ObjectKind, name: String },

    #[error("Table {table} declares column {column} twice")]
    DuplicateColumn { table: String, column: String },

    #[error("Table {table} references {references} before it is declared")]
    ForwardReference { table: String, references: String },

    #[error("Column {table}.{column} uses type {type_name} before it is declared")]
    UndeclaredType { table: String, column: String, type_name: String },

    #[error("Index {index} targets undeclared table {table}")]
    IndexOnUnknownTable { index: String, table: String },

    #[error("Index {index} targets missing column {table}.{column}")]
    IndexOnUnknownColumn { index: String, table: String, column: String },

    #[error("Enum type {0} has no labels")]
    EmptyEnum(String),

    #[error("Table {0} has no columns")]
    EmptyTable(String),

    #[error("Index {0} has no columns")]
    EmptyIndex(String),
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid schema plan: {0}")]
    InvalidPlan(#[from] PlanError),

    #[error("Connection error: {0}")]
    Connection(DbFailure),

    #[error("Transaction error during {stage}: {source}")]
    Transaction {
        stage: &'static str,
        source: DbFailure,
    },

    #[error("Failed to create {kind} {name}: {source}")]
    Statement {
        kind: ObjectKind,
        name: String,
        source: DbFailure,
    },

    #[error("Schema inspection error: {0}")]
    Inspection(DbFailure),
}

impl SchemaError {
    pub fn transaction(stage: &'static str, source: DbFailure) -> Self {
        SchemaError::Transaction { stage, source }
    }
}
