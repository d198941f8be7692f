//! PostgreSQL implementation of SubmissionGateway.
//!
//! Each record becomes one row of `intake_submissions`; the field values are
//! stored as a JSONB payload so both questionnaires share the table.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use std::time::Duration;

use crate::domain::intake::IntakeRecord;
use crate::ports::{PersistenceError, SubmissionGateway};

const SCHEMA_SQL: &str = include_str!("../../../migrations/0001_intake_submissions.sql");

/// PostgreSQL implementation of SubmissionGateway.
#[derive(Clone)]
pub struct PostgresSubmissionGateway {
    pool: PgPool,
}

impl PostgresSubmissionGateway {
    /// Creates a gateway over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a lazily connecting pool; nothing is dialled until the first save.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, PersistenceError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(map_sqlx_error)?;

        Ok(Self::new(pool))
    }

    /// Creates the table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        (&self.pool)
            .execute(SCHEMA_SQL)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl SubmissionGateway for PostgresSubmissionGateway {
    async fn save(&self, record: &IntakeRecord) -> Result<(), PersistenceError> {
        let payload = serde_json::to_value(record.values())?;

        sqlx::query(
            r#"
            INSERT INTO intake_submissions (
                id, kind, company_name, email, payload, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.kind().as_str())
        .bind(record.company_name())
        .bind(record.submitter_email())
        .bind(payload)
        .bind(record.submitted_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

/// Connection-level failures are `Unavailable`; anything the database itself
/// refused is `Rejected`.
fn map_sqlx_error(err: sqlx::Error) -> PersistenceError {
    match err {
        sqlx::Error::Database(db) => PersistenceError::rejected(db.to_string()),
        sqlx::Error::Decode(e) => PersistenceError::Serialization(e.to_string()),
        err @ sqlx::Error::ColumnDecode { .. } => PersistenceError::Serialization(err.to_string()),
        other => PersistenceError::unavailable(format!("Failed to insert submission: {}", other)),
    }
}
