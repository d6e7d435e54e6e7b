use serde::Serialize;

use crate::config::PlatformConfig;
use crate::models::ExecutionStatus;

use super::{PlatformError, check_status};

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct EventPayload<'a> {
    contact_key: &'a str,
    event_definition_key: &'a str,
    data: &'a serde_json::Value,
}

/// Result of firing one event. A rejected event is an outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    Success,
    Failed(String),
}

impl TriggerOutcome {
    pub fn status(&self) -> ExecutionStatus {
        match self {
            TriggerOutcome::Success => ExecutionStatus::Success,
            TriggerOutcome::Failed(_) => ExecutionStatus::Error,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            TriggerOutcome::Success => None,
            TriggerOutcome::Failed(msg) => Some(msg.as_str()),
        }
    }
}

/// Posts behavioral events that move a contact into a journey.
pub struct EventTrigger {
    client: reqwest::Client,
    config: PlatformConfig,
}

impl EventTrigger {
    pub fn new(client: reqwest::Client, config: PlatformConfig) -> Self {
        Self { client, config }
    }

    pub async fn trigger_journey(
        &self,
        token: &str,
        contact_key: &str,
        event_definition_key: &str,
        data: &serde_json::Value,
    ) -> TriggerOutcome {
        let payload = EventPayload {
            contact_key,
            event_definition_key,
            data,
        };

        match self.send(token, &payload).await {
            Ok(()) => TriggerOutcome::Success,
            Err(e) => {
                tracing::warn!(
                    contact_key,
                    event_definition_key,
                    "Error triggering journey: {e}"
                );
                TriggerOutcome::Failed(e.to_string())
            }
        }
    }

    async fn send(&self, token: &str, payload: &EventPayload<'_>) -> Result<(), PlatformError> {
        let resp = self
            .client
            .post(self.config.events_url())
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }
}
