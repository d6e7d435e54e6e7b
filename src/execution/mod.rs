pub mod arguments;
pub mod pipeline;

use crate::platform::PlatformError;

/// Failures caught once at the execute boundary. A rejected event is not
/// one of them: it comes back as `TriggerOutcome::Failed`.
#[derive(Debug)]
pub enum ExecutionError {
    MalformedInput(String),
    TokenAcquisition(PlatformError),
    Persistence(sqlx::Error),
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionError::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
            ExecutionError::TokenAcquisition(err) => write!(f, "token acquisition failed: {err}"),
            ExecutionError::Persistence(err) => write!(f, "persistence failed: {err}"),
        }
    }
}

impl std::error::Error for ExecutionError {}
