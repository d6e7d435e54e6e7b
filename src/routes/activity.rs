use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::execution::pipeline;
use crate::models::{ExecutionRecord, NewExecutionRecord};
use crate::state::SharedState;

// The host only needs a 200 from these to move on.

pub async fn edit() -> &'static str {
    "Edit"
}

pub async fn validate() -> &'static str {
    "Validate"
}

pub async fn publish() -> &'static str {
    "Publish"
}

pub async fn stop() -> &'static str {
    "Stop"
}

/// Persist the posted configuration as an execution record. A payload without
/// record fields is not written, but the store is still reached so that an
/// unavailable database is reported to the host.
pub async fn save(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let record = serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(|e| format!("body is not JSON: {e}"))
        .and_then(|payload| NewExecutionRecord::from_payload(&payload));

    match record {
        Ok(record) => state.store.save(&record).await?,
        Err(reason) => {
            state.store.ensure_schema().await?;
            tracing::warn!("Configuration not saved as a record: {reason}");
        }
    }

    Ok("Save")
}

/// Always acknowledged, so one contact's failure never stalls the journey.
pub async fn execute(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> &'static str {
    match body {
        Ok(body) => {
            pipeline::run(&state, &body).await;
        }
        // Oversized or unreadable bodies are recorded like any other bad input.
        Err(rejection) => {
            pipeline::reject(&state, format!("body could not be read: {rejection}")).await;
        }
    }
    "Execute"
}

pub async fn get_by_uuid(
    State(state): State<SharedState>,
    Path(uuid): Path<String>,
) -> Result<Json<Vec<ExecutionRecord>>, AppError> {
    let records = state.store.find_by_uuid(&uuid).await?;

    if records.is_empty() {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    Ok(Json(records))
}
