use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::SharedState;

/// Journeys available on the platform, for the activity's configuration UI.
pub async fn list(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, AppError> {
    let token = state
        .tokens
        .retrieve_token()
        .await
        .map_err(|e| AppError::Internal(format!("Error retrieving journeys: {e}")))?;

    let journeys = state
        .journeys
        .fetch_journeys(&token)
        .await
        .map_err(|e| AppError::Internal(format!("Error retrieving journeys: {e}")))?;

    Ok(Json(journeys))
}
