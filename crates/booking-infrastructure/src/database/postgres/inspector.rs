//! PostgreSQL schema inspector (reads the system catalogs)

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use booking_schema::ports::SchemaInspector;
use booking_schema::schema::SchemaSnapshot;
use booking_schema::DbFailure;

use crate::database::error::db_failure;

const EXTENSIONS_SQL: &str = "SELECT extname::text FROM pg_extension";

const ENUM_TYPES_SQL: &str = r#"
    SELECT t.typname::text
    FROM pg_type t
    JOIN pg_namespace n ON n.oid = t.typnamespace
    WHERE t.typtype = 'e' AND n.nspname = current_schema()
"#;

const TABLES_SQL: &str = "SELECT tablename::text FROM pg_tables WHERE schemaname = current_schema()";

const INDEXES_SQL: &str = "SELECT indexname::text FROM pg_indexes WHERE schemaname = current_schema()";

#[derive(Clone)]
pub struct PgSchemaInspector {
    pool: PgPool,
}

impl PgSchemaInspector {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn names(&self, sql: &str) -> Result<BTreeSet<String>, DbFailure> {
        let rows: Vec<String> = sqlx::query_scalar(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error inspecting schema: {}", e);
                db_failure(e)
            })?;

        Ok(rows.into_iter().collect())
    }
}

#[async_trait]
impl SchemaInspector for PgSchemaInspector {
    async fn inspect(&self) -> Result<SchemaSnapshot, DbFailure> {
        Ok(SchemaSnapshot {
            extensions: self.names(EXTENSIONS_SQL).await?,
            enum_types: self.names(ENUM_TYPES_SQL).await?,
            tables: self.names(TABLES_SQL).await?,
            indexes: self.names(INDEXES_SQL).await?,
        })
    }
}
