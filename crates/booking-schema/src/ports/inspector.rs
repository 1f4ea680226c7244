//! Schema inspector port

use async_trait::async_trait;

use crate::error::DbFailure;
use crate::schema::SchemaSnapshot;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Objects currently present in the target schema.
    async fn inspect(&self) -> Result<SchemaSnapshot, DbFailure>;
}
