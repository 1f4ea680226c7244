//! What a store currently holds, compared against a plan

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::plan::SchemaPlan;
use super::statement::ObjectKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    pub extensions: BTreeSet<String>,
    pub enum_types: BTreeSet<String>,
    pub tables: BTreeSet<String>,
    pub indexes: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingObject {
    pub kind: ObjectKind,
    pub name: String,
}

impl fmt::Display for MissingObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

impl SchemaSnapshot {
    pub fn contains(&self, kind: ObjectKind, name: &str) -> bool {
        let set = match kind {
            ObjectKind::Extension => &self.extensions,
            ObjectKind::EnumType => &self.enum_types,
            ObjectKind::Table => &self.tables,
            ObjectKind::Index => &self.indexes,
        };
        set.contains(name)
    }

    /// Plan objects absent from this snapshot, in plan order.
    pub fn missing_from(&self, plan: &SchemaPlan) -> Vec<MissingObject> {
        plan.statements()
            .iter()
            .filter(|s| !self.contains(s.kind, &s.name))
            .map(|s| MissingObject {
                kind: s.kind,
                name: s.name.clone(),
            })
            .collect()
    }
}
