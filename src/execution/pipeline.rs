use serde_json::Value;

use crate::models::{ExecutionStatus, NewExecutionRecord};
use crate::state::SharedState;

use super::arguments::{self, Identifiers};
use super::ExecutionError;

/// Run one execute call to completion. Never fails: every outcome ends up in
/// the activity log (or in the process log when even that write fails).
pub async fn run(state: &SharedState, body: &[u8]) -> ExecutionStatus {
    let request: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            let error = ExecutionError::MalformedInput(format!("body is not JSON: {e}"));
            tracing::error!("Error executing journey: {error}");
            record_failure(state, Identifiers::default(), &error).await;
            return ExecutionStatus::Error;
        }
    };

    match trigger_and_record(state, &request).await {
        Ok(status) => status,
        Err(error) => {
            tracing::error!("Error executing journey: {error}");
            record_failure(state, arguments::identifiers(&request), &error).await;
            ExecutionStatus::Error
        }
    }
}

/// Record an execute call whose body never reached the pipeline.
pub async fn reject(state: &SharedState, reason: String) -> ExecutionStatus {
    let error = ExecutionError::MalformedInput(reason);
    tracing::error!("Error executing journey: {error}");
    record_failure(state, Identifiers::default(), &error).await;
    ExecutionStatus::Error
}

/// Token, trigger, persist; strictly in that order.
async fn trigger_and_record(
    state: &SharedState,
    request: &Value,
) -> Result<ExecutionStatus, ExecutionError> {
    let args = arguments::parse(request)?;

    let token = state
        .tokens
        .retrieve_token()
        .await
        .map_err(ExecutionError::TokenAcquisition)?;

    let outcome = state
        .events
        .trigger_journey(&token, &args.contact_key, &args.event_definition_key, &args.payload)
        .await;

    let record = match outcome.error_message() {
        None => NewExecutionRecord::success(args.uuid, args.contact_key),
        Some(message) => NewExecutionRecord::error(args.uuid, args.contact_key, message),
    };

    state
        .store
        .save(&record)
        .await
        .map_err(ExecutionError::Persistence)?;

    tracing::info!(
        uuid = %record.uuid,
        contact_key = %record.contact_key,
        status = record.status.as_str(),
        "Execution recorded"
    );

    Ok(outcome.status())
}

/// Best-effort Error record. Missing identifiers are stored empty so the
/// attempt still leaves a row; a failed write is only logged.
async fn record_failure(state: &SharedState, ids: Identifiers, error: &ExecutionError) {
    let record = NewExecutionRecord::error(
        ids.uuid.unwrap_or_default(),
        ids.contact_key.unwrap_or_default(),
        error.to_string(),
    );

    if let Err(e) = state.store.save(&record).await {
        tracing::error!(
            uuid = %record.uuid,
            contact_key = %record.contact_key,
            "Error saving error log to database: {e}"
        );
    }
}
