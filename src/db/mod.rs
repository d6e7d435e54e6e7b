pub mod activity_data;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};

use crate::models::{ExecutionRecord, NewExecutionRecord};

/// Append-only log of execute attempts.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Reach the store and create the log table if needed, without writing a row.
    async fn ensure_schema(&self) -> Result<(), sqlx::Error>;
    async fn save(&self, record: &NewExecutionRecord) -> Result<(), sqlx::Error>;
    async fn find_by_uuid(&self, uuid: &str) -> Result<Vec<ExecutionRecord>, sqlx::Error>;
}

/// Postgres-backed log. Every call opens its own connection and closes it
/// before returning, whatever the outcome of the statements.
pub struct PgActivityLog {
    database_url: String,
    ssl_mode: PgSslMode,
}

impl PgActivityLog {
    pub fn new(database_url: impl Into<String>, ssl_mode: PgSslMode) -> Self {
        Self {
            database_url: database_url.into(),
            ssl_mode,
        }
    }

    async fn connect(&self) -> Result<PgConnection, sqlx::Error> {
        // Require encrypts but does not verify the server certificate.
        let options = self
            .database_url
            .parse::<PgConnectOptions>()?
            .ssl_mode(self.ssl_mode);
        PgConnection::connect_with(&options).await
    }
}

async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection: {e}");
    }
}

#[async_trait]
impl ActivityLog for PgActivityLog {
    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = activity_data::ensure_table(&mut conn).await;
        release(conn).await;
        result
    }

    async fn save(&self, record: &NewExecutionRecord) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;

        let result = async {
            activity_data::ensure_table(&mut conn).await?;
            activity_data::insert(&mut conn, record).await
        }
        .await;

        release(conn).await;
        result
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Vec<ExecutionRecord>, sqlx::Error> {
        let mut conn = self.connect().await?;

        // A lookup before the first write sees an empty table, not a missing one.
        let result = async {
            activity_data::ensure_table(&mut conn).await?;
            activity_data::find_by_uuid(&mut conn, uuid).await
        }
        .await;

        release(conn).await;
        result
    }
}
