//! Clients for the journey platform's REST APIs.

pub mod events;
pub mod journeys;
pub mod token;

pub use events::{EventTrigger, TriggerOutcome};
pub use journeys::JourneyCatalog;
pub use token::TokenProvider;

use std::time::Duration;

/// Largest slice of a rejected response body kept in the error message.
const MAX_ERROR_BODY: usize = 1024;

#[derive(Debug)]
pub enum PlatformError {
    Request(reqwest::Error),
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    InvalidResponse(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Request(err) => write!(f, "request failed: {err}"),
            PlatformError::Rejected { status, body } if body.is_empty() => {
                write!(f, "request rejected with status {status}")
            }
            PlatformError::Rejected { status, body } => {
                write!(f, "request rejected with status {status}: {body}")
            }
            PlatformError::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        PlatformError::Request(err)
    }
}

pub fn http_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Turn a non-2xx response into `PlatformError::Rejected`, keeping the head of its body.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, PlatformError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(MAX_ERROR_BODY)
        .collect::<String>();

    Err(PlatformError::Rejected { status, body })
}
