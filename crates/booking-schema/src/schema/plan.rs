//! Ordered schema plan and its dependency-order validation

use std::collections::HashSet;

use serde::Serialize;

use super::statement::{Definition, ObjectKind, SchemaStatement, TableDef};
use crate::error::PlanError;

/// Statements in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaPlan {
    statements: Vec<SchemaStatement>,
}

impl SchemaPlan {
    pub fn new(statements: Vec<SchemaStatement>) -> Self {
        Self { statements }
    }

    pub fn push(mut self, statement: SchemaStatement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn statements(&self) -> &[SchemaStatement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn names_of(&self, kind: ObjectKind) -> Vec<&str> {
        self.statements
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn extensions(&self) -> Vec<&str> {
        self.names_of(ObjectKind::Extension)
    }

    pub fn enum_types(&self) -> Vec<&str> {
        self.names_of(ObjectKind::EnumType)
    }

    pub fn tables(&self) -> Vec<&str> {
        self.names_of(ObjectKind::Table)
    }

    pub fn indexes(&self) -> Vec<&str> {
        self.names_of(ObjectKind::Index)
    }

    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.statements
            .iter()
            .find(|s| s.kind == ObjectKind::Table && s.name == name)
            .and_then(|s| s.as_table())
    }

    /// Check that every statement only depends on objects declared before it.
    ///
    /// Walks the plan once, tracking what has been declared so far. A table may
    /// reference itself; any other reference must point backwards.
    pub fn validate(&self) -> Result<(), PlanError> {
        let all_enums: HashSet<&str> = self.enum_types().into_iter().collect();
        let mut seen: HashSet<(ObjectKind, &str)> = HashSet::new();
        let mut declared_enums: HashSet<&str> = HashSet::new();
        let mut declared_tables: HashSet<&str> = HashSet::new();

        for stmt in &self.statements {
            if !seen.insert((stmt.kind, stmt.name.as_str())) {
                return Err(PlanError::DuplicateName {
                    kind: stmt.kind,
                    name: stmt.name.clone(),
                });
            }

            match &stmt.definition {
                Definition::Extension => {}
                Definition::Enum { labels } => {
                    if labels.is_empty() {
                        return Err(PlanError::EmptyEnum(stmt.name.clone()));
                    }
                    declared_enums.insert(stmt.name.as_str());
                }
                Definition::Table(table) => {
                    validate_table(&stmt.name, table, &all_enums, &declared_enums, &declared_tables)?;
                    declared_tables.insert(stmt.name.as_str());
                }
                Definition::Index { table, columns } => {
                    if columns.is_empty() {
                        return Err(PlanError::EmptyIndex(stmt.name.clone()));
                    }
                    let Some(target) = self.table(table).filter(|_| declared_tables.contains(table.as_str())) else {
                        return Err(PlanError::IndexOnUnknownTable {
                            index: stmt.name.clone(),
                            table: table.clone(),
                        });
                    };
                    if let Some(missing) = columns.iter().find(|c| !target.has_column(c)) {
                        return Err(PlanError::IndexOnUnknownColumn {
                            index: stmt.name.clone(),
                            table: table.clone(),
                            column: missing.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

fn validate_table(
    name: &str,
    table: &TableDef,
    all_enums: &HashSet<&str>,
    declared_enums: &HashSet<&str>,
    declared_tables: &HashSet<&str>,
) -> Result<(), PlanError> {
    if table.columns.is_empty() {
        return Err(PlanError::EmptyTable(name.to_string()));
    }

    let mut columns = HashSet::new();
    for column in &table.columns {
        if !columns.insert(column.name.as_str()) {
            return Err(PlanError::DuplicateColumn {
                table: name.to_string(),
                column: column.name.clone(),
            });
        }

        if all_enums.contains(column.sql_type.as_str()) && !declared_enums.contains(column.sql_type.as_str()) {
            return Err(PlanError::UndeclaredType {
                table: name.to_string(),
                column: column.name.clone(),
                type_name: column.sql_type.clone(),
            });
        }
    }

    for referenced in table.referenced_tables() {
        if referenced != name && !declared_tables.contains(referenced) {
            return Err(PlanError::ForwardReference {
                table: name.to_string(),
                references: referenced.to_string(),
            });
        }
    }

    Ok(())
}
