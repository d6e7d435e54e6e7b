use serde::{Deserialize, Serialize};

use crate::config::PlatformConfig;

use super::{PlatformError, check_status};

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchanges the configured client credentials for a bearer token.
pub struct TokenProvider {
    client: reqwest::Client,
    config: PlatformConfig,
}

impl TokenProvider {
    pub fn new(client: reqwest::Client, config: PlatformConfig) -> Self {
        Self { client, config }
    }

    /// Failures are returned to the caller, which decides what to record.
    pub async fn retrieve_token(&self) -> Result<String, PlatformError> {
        let request = TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
        };

        let result = self.request_token(&request).await;
        if let Err(e) = &result {
            tracing::error!("Error retrieving token: {e}");
        }
        result
    }

    async fn request_token(&self, request: &TokenRequest<'_>) -> Result<String, PlatformError> {
        let resp = self
            .client
            .post(self.config.token_url())
            .json(request)
            .send()
            .await?;

        let token = check_status(resp)
            .await?
            .json::<TokenResponse>()
            .await
            .map_err(|e| PlatformError::InvalidResponse(format!("token response: {e}")))?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                PlatformError::InvalidResponse("token response carries no access_token".to_string())
            })
    }
}
