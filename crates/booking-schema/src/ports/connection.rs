//! Connection provider and session ports

use async_trait::async_trait;

use crate::error::DbFailure;
use crate::schema::SchemaStatement;

/// Hands out one session at a time, typically backed by a pool.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn SchemaSession>, DbFailure>;
}

/// One checked-out connection.
///
/// `release` hands the connection back. Implementations must also give it
/// back on drop so a panic mid-run cannot leak it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaSession: Send {
    async fn begin(&mut self) -> Result<(), DbFailure>;

    /// Transaction-scoped advisory lock, released by commit or rollback.
    async fn lock(&mut self, key: i64) -> Result<(), DbFailure>;

    async fn savepoint(&mut self, name: &str) -> Result<(), DbFailure>;
    async fn release_savepoint(&mut self, name: &str) -> Result<(), DbFailure>;
    async fn rollback_to_savepoint(&mut self, name: &str) -> Result<(), DbFailure>;

    async fn execute(&mut self, statement: &SchemaStatement) -> Result<(), DbFailure>;

    async fn commit(&mut self) -> Result<(), DbFailure>;
    async fn rollback(&mut self) -> Result<(), DbFailure>;

    async fn release(&mut self);
}
