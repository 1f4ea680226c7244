//! Postgres DDL rendering
//!
//! Every statement renders as "create if absent". Postgres has no
//! `CREATE TYPE IF NOT EXISTS`, so enums are wrapped in a `DO` block that
//! looks the type up in `current_schema()`, the schema `CREATE TYPE` writes to.
//! A same-named type further down the `search_path` does not count.

use super::statement::{ColumnDef, Definition, OnDelete, SchemaStatement, TableDef};

/// Render one statement as idempotent Postgres DDL.
pub fn postgres(statement: &SchemaStatement) -> String {
    match &statement.definition {
        Definition::Extension => {
            format!("CREATE EXTENSION IF NOT EXISTS {};", quote_ident(&statement.name))
        }
        Definition::Enum { labels } => render_enum(&statement.name, labels),
        Definition::Table(table) => render_table(&statement.name, table),
        Definition::Index { table, columns } => format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({});",
            statement.name,
            table,
            columns.join(", ")
        ),
    }
}

/// Render a whole plan, one statement per block, for `--plan` output.
pub fn postgres_script(statements: &[SchemaStatement]) -> String {
    statements
        .iter()
        .map(postgres)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_enum(name: &str, labels: &[String]) -> String {
    let labels = labels
        .iter()
        .map(|l| quote_literal(l))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "DO $$\nBEGIN\n    IF NOT EXISTS (\n        SELECT 1 FROM pg_type t\n        JOIN pg_namespace n ON n.oid = t.typnamespace\n        WHERE t.typname = {lookup} AND n.nspname = current_schema()\n    ) THEN\n        CREATE TYPE {name} AS ENUM ({labels});\n    END IF;\nEND\n$$;",
        lookup = quote_literal(name),
    )
}

fn render_table(name: &str, table: &TableDef) -> String {
    let mut lines: Vec<String> = table.columns.iter().map(render_column).collect();
    lines.extend(
        table
            .checks
            .iter()
            .map(|c| format!("CONSTRAINT {} CHECK ({})", c.name, c.expression)),
    );

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
        name,
        lines.join(",\n    ")
    )
}

fn render_column(column: &ColumnDef) -> String {
    let mut sql = format!("{} {}", column.name, column.sql_type);
    if column.primary_key {
        sql.push_str(" PRIMARY KEY");
    }
    if column.unique {
        sql.push_str(" UNIQUE");
    }
    if column.not_null {
        sql.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(default);
    }
    if let Some(fk) = &column.references {
        sql.push_str(&format!(" REFERENCES {}({})", fk.table, fk.column));
        match fk.on_delete {
            OnDelete::NoAction => {}
            OnDelete::Cascade => sql.push_str(" ON DELETE CASCADE"),
            OnDelete::SetNull => sql.push_str(" ON DELETE SET NULL"),
        }
    }
    sql
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
