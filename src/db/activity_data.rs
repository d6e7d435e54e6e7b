use sqlx::PgConnection;

use crate::models::{ExecutionRecord, NewExecutionRecord};

pub async fn ensure_table(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS activity_data (
            id SERIAL PRIMARY KEY,
            uuid VARCHAR(36) NOT NULL,
            contact_key VARCHAR(255) NOT NULL,
            trigger_date TIMESTAMP NOT NULL,
            status VARCHAR(50) NOT NULL,
            error_log TEXT
        )",
    )
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert(conn: &mut PgConnection, record: &NewExecutionRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO activity_data (uuid, contact_key, trigger_date, status, error_log)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&record.uuid)
    .bind(&record.contact_key)
    .bind(record.trigger_date)
    .bind(record.status.as_str())
    .bind(record.error_log.as_deref())
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_uuid(
    conn: &mut PgConnection,
    uuid: &str,
) -> Result<Vec<ExecutionRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExecutionRecord>(
        "SELECT id, uuid, contact_key, trigger_date, status, error_log
         FROM activity_data WHERE uuid = $1 ORDER BY id",
    )
    .bind(uuid)
    .fetch_all(conn)
    .await
}
