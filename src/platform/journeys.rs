use crate::config::PlatformConfig;

use super::{PlatformError, check_status};

/// Lists the journeys (interactions) defined on the platform.
pub struct JourneyCatalog {
    client: reqwest::Client,
    config: PlatformConfig,
}

impl JourneyCatalog {
    pub fn new(client: reqwest::Client, config: PlatformConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch_journeys(&self, token: &str) -> Result<serde_json::Value, PlatformError> {
        let resp = self
            .client
            .get(self.config.interactions_url())
            .bearer_auth(token)
            .send()
            .await?;

        check_status(resp)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| PlatformError::InvalidResponse(format!("interactions response: {e}")))
    }
}
