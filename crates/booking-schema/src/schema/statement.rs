// ============================================================================
// Booking Schema - Statement Descriptors
// File: crates/booking-schema/src/schema/statement.rs
// Description: Dialect-free description of one idempotent DDL statement
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::domain::SchemaEnum;

/// Kind of database object a statement creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Extension,
    EnumType,
    Table,
    Index,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Extension => "extension",
            ObjectKind::EnumType => "enum type",
            ObjectKind::Table => "table",
            ObjectKind::Index => "index",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OnDelete {
    NoAction,
    Cascade,
    SetNull,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    pub on_delete: OnDelete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: String,
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<String>,
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            primary_key: false,
            not_null: false,
            unique: false,
            default: None,
            references: None,
        }
    }

    /// Column typed by a domain enum, e.g. `status company_status`.
    pub fn enumerated<E: SchemaEnum>(name: impl Into<String>) -> Self {
        Self::new(name, E::TYPE_NAME)
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Raw SQL default expression, e.g. `NOW()`.
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Default to an enum label, rendered as a quoted literal.
    pub fn default_label<E: SchemaEnum>(self, value: E) -> Self {
        let literal = format!("'{}'", value.as_str().replace('\'', "''"));
        self.default_expr(literal)
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>, on_delete: OnDelete) -> Self {
        self.references = Some(ForeignKey {
            table: table.into(),
            column: column.into(),
            on_delete,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckConstraint {
    pub name: String,
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableDef {
    pub columns: Vec<ColumnDef>,
    pub checks: Vec<CheckConstraint>,
}

impl TableDef {
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn check(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.checks.push(CheckConstraint {
            name: name.into(),
            expression: expression.into(),
        });
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Tables this one points at through foreign keys.
    pub fn referenced_tables(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter_map(|c| c.references.as_ref())
            .map(|fk| fk.table.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Definition {
    Extension,
    Enum { labels: Vec<String> },
    Table(TableDef),
    Index { table: String, columns: Vec<String> },
}

/// One "create if absent" statement of a schema plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaStatement {
    pub kind: ObjectKind,
    pub name: String,
    pub definition: Definition,
}

impl SchemaStatement {
    pub fn extension(name: impl Into<String>) -> Self {
        Self {
            kind: ObjectKind::Extension,
            name: name.into(),
            definition: Definition::Extension,
        }
    }

    pub fn enum_type<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: ObjectKind::EnumType,
            name: name.into(),
            definition: Definition::Enum {
                labels: labels.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Enum type declared straight from a domain enum.
    pub fn enum_of<E: SchemaEnum>() -> Self {
        Self::enum_type(E::TYPE_NAME, E::labels())
    }

    pub fn table(name: impl Into<String>, table: TableDef) -> Self {
        Self {
            kind: ObjectKind::Table,
            name: name.into(),
            definition: Definition::Table(table),
        }
    }

    pub fn index<I, S>(name: impl Into<String>, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: ObjectKind::Index,
            name: name.into(),
            definition: Definition::Index {
                table: table.into(),
                columns: columns.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn as_table(&self) -> Option<&TableDef> {
        match &self.definition {
            Definition::Table(table) => Some(table),
            _ => None,
        }
    }
}
