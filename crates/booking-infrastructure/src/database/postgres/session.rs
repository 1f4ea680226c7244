// ============================================================================
// Booking Infrastructure - PostgreSQL Schema Session
// File: crates/booking-infrastructure/src/database/postgres/session.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Executor, PgConnection, PgPool, Postgres};
use tracing::{debug, error, warn};

use booking_schema::ports::{ConnectionProvider, SchemaSession};
use booking_schema::schema::render;
use booking_schema::{DbFailure, SchemaStatement};

use crate::database::error::db_failure;

#[derive(Clone)]
pub struct PgConnectionProvider {
    pool: PgPool,
}

impl PgConnectionProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionProvider for PgConnectionProvider {
    async fn acquire(&self) -> Result<Box<dyn SchemaSession>, DbFailure> {
        let conn = self.pool.acquire().await.map_err(|e| {
            error!("Database error acquiring connection: {}", e);
            db_failure(e)
        })?;

        Ok(Box::new(PgSchemaSession::new(conn)))
    }
}

/// One pooled connection driving the initializer's transaction with plain
/// `BEGIN`/`COMMIT`/`ROLLBACK` over the simple query protocol.
pub struct PgSchemaSession {
    conn: Option<PoolConnection<Postgres>>,
    in_transaction: bool,
}

impl PgSchemaSession {
    pub fn new(conn: PoolConnection<Postgres>) -> Self {
        Self {
            conn: Some(conn),
            in_transaction: false,
        }
    }

    fn connection(&mut self) -> Result<&mut PgConnection, DbFailure> {
        self.conn
            .as_deref_mut()
            .ok_or_else(|| DbFailure::new("session already released"))
    }

    async fn run(&mut self, sql: &str) -> Result<(), DbFailure> {
        self.connection()?.execute(sql).await.map_err(db_failure)?;
        Ok(())
    }
}

#[async_trait]
impl SchemaSession for PgSchemaSession {
    async fn begin(&mut self) -> Result<(), DbFailure> {
        self.run("BEGIN").await?;
        self.in_transaction = true;
        Ok(())
    }

    async fn lock(&mut self, key: i64) -> Result<(), DbFailure> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(key)
            .execute(self.connection()?)
            .await
            .map_err(db_failure)?;
        Ok(())
    }

    async fn savepoint(&mut self, name: &str) -> Result<(), DbFailure> {
        self.run(&format!("SAVEPOINT {}", name)).await
    }

    async fn release_savepoint(&mut self, name: &str) -> Result<(), DbFailure> {
        self.run(&format!("RELEASE SAVEPOINT {}", name)).await
    }

    async fn rollback_to_savepoint(&mut self, name: &str) -> Result<(), DbFailure> {
        self.run(&format!("ROLLBACK TO SAVEPOINT {}", name)).await
    }

    async fn execute(&mut self, statement: &SchemaStatement) -> Result<(), DbFailure> {
        let sql = render::postgres(statement);
        debug!("Executing {} {}", statement.kind, statement.name);
        self.run(&sql).await
    }

    async fn commit(&mut self) -> Result<(), DbFailure> {
        let result = self.run("COMMIT").await;
        if commit_ended_transaction(&result) {
            self.in_transaction = false;
        }
        result
    }

    async fn rollback(&mut self) -> Result<(), DbFailure> {
        let result = self.run("ROLLBACK").await;
        if result.is_ok() {
            self.in_transaction = false;
        }
        result
    }

    async fn release(&mut self) {
        if self.in_transaction {
            warn!("Releasing schema session with an open transaction; rolling back");
            if self.rollback().await.is_err() {
                if let Some(conn) = self.conn.as_mut() {
                    conn.close_on_drop();
                }
            }
        }
        self.conn.take();
    }
}

/// A COMMIT the server answered, even with an error, ends the transaction.
/// A failure with no SQLSTATE never reached the server, so the transaction
/// state is unknown and the connection must not go back to the pool.
fn commit_ended_transaction(result: &Result<(), DbFailure>) -> bool {
    match result {
        Ok(()) => true,
        Err(failure) => failure.code.is_some(),
    }
}

impl Drop for PgSchemaSession {
    fn drop(&mut self) {
        // Never hand a connection with an open transaction back to the pool.
        if self.in_transaction {
            if let Some(conn) = self.conn.as_mut() {
                conn.close_on_drop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_answered_by_server_ends_transaction() {
        assert!(commit_ended_transaction(&Ok(())));
        assert!(commit_ended_transaction(&Err(DbFailure::with_code(
            "40001",
            "could not serialize access"
        ))));
    }

    #[test]
    fn test_commit_lost_in_transport_keeps_transaction_open() {
        assert!(!commit_ended_transaction(&Err(DbFailure::new(
            "connection reset by peer"
        ))));
    }
}
