// ============================================================================
// Booking Schema - Schema Initializer
// File: crates/booking-schema/src/services/initializer.rs
// ============================================================================
//! Idempotent, all-or-nothing schema convergence on one connection

use serde::Serialize;
use tracing::{debug, error, info, warn};

use booking_shared::constants::DEFAULT_SCHEMA_LOCK_KEY;

use crate::error::SchemaError;
use crate::ports::{ConnectionProvider, SchemaSession};
use crate::schema::{catalog, SchemaPlan};

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// Statements that ran to completion (including `IF NOT EXISTS` no-ops).
    pub executed: usize,
    /// Statements that lost a creation race and were treated as done.
    pub already_present: usize,
}

impl InitReport {
    pub fn total(&self) -> usize {
        self.executed + self.already_present
    }
}

/// Runs a [`SchemaPlan`] inside one transaction on one connection.
pub struct SchemaInitializer {
    plan: SchemaPlan,
    lock_key: Option<i64>,
}

impl SchemaInitializer {
    pub fn new(plan: SchemaPlan) -> Self {
        Self {
            plan,
            lock_key: Some(DEFAULT_SCHEMA_LOCK_KEY),
        }
    }

    /// Initializer for the booking/payments catalog.
    pub fn booking() -> Self {
        Self::new(catalog::booking_schema())
    }

    pub fn with_lock_key(mut self, key: i64) -> Self {
        self.lock_key = Some(key);
        self
    }

    /// Skip the advisory lock; concurrent runs then rely on already-exists handling alone.
    pub fn without_lock(mut self) -> Self {
        self.lock_key = None;
        self
    }

    pub fn plan(&self) -> &SchemaPlan {
        &self.plan
    }

    /// Converge the store onto the plan.
    ///
    /// Either every statement succeeds and the transaction commits, or the
    /// transaction is rolled back and the first failure is returned. The
    /// session is released on every path once acquired.
    pub async fn initialize(&self, provider: &dyn ConnectionProvider) -> Result<InitReport, SchemaError> {
        self.plan.validate()?;

        info!("Initializing database schema ({} statements)", self.plan.len());

        let mut session = provider.acquire().await.map_err(|e| {
            error!("Failed to acquire database connection: {}", e);
            SchemaError::Connection(e)
        })?;

        let result = self.run(session.as_mut()).await;
        session.release().await;

        match &result {
            Ok(report) => info!(
                "Database initialized successfully ({} executed, {} already present)",
                report.executed, report.already_present
            ),
            Err(e) => error!("Database initialization failed: {}", e),
        }

        result
    }

    async fn run(&self, session: &mut dyn SchemaSession) -> Result<InitReport, SchemaError> {
        session
            .begin()
            .await
            .map_err(|e| SchemaError::transaction("begin", e))?;

        match self.apply(session).await {
            Ok(report) => {
                session
                    .commit()
                    .await
                    .map_err(|e| SchemaError::transaction("commit", e))?;
                Ok(report)
            }
            Err(err) => {
                if let Err(rollback_err) = session.rollback().await {
                    warn!("Rollback after failed initialization also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn apply(&self, session: &mut dyn SchemaSession) -> Result<InitReport, SchemaError> {
        if let Some(key) = self.lock_key {
            debug!("Waiting for schema advisory lock {}", key);
            session
                .lock(key)
                .await
                .map_err(|e| SchemaError::transaction("lock", e))?;
        }

        let mut report = InitReport::default();

        for (position, statement) in self.plan.statements().iter().enumerate() {
            let savepoint = format!("schema_stmt_{}", position);
            session
                .savepoint(&savepoint)
                .await
                .map_err(|e| SchemaError::transaction("savepoint", e))?;

            match session.execute(statement).await {
                Ok(()) => {
                    session
                        .release_savepoint(&savepoint)
                        .await
                        .map_err(|e| SchemaError::transaction("release savepoint", e))?;
                    debug!("Ensured {} {}", statement.kind, statement.name);
                    report.executed += 1;
                }
                Err(failure) if failure.is_already_exists() => {
                    session
                        .rollback_to_savepoint(&savepoint)
                        .await
                        .map_err(|e| SchemaError::transaction("rollback to savepoint", e))?;
                    debug!("{} {} already exists: {}", statement.kind, statement.name, failure);
                    report.already_present += 1;
                }
                Err(failure) => {
                    return Err(SchemaError::Statement {
                        kind: statement.kind,
                        name: statement.name.clone(),
                        source: failure,
                    });
                }
            }
        }

        Ok(report)
    }
}
