use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced to callers of the account and customer services.
/// Nothing is retried or swallowed; each variant maps to one way a single
/// request can go wrong.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend responded {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("cannot decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("cannot encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a rejected request, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool { self.status() == Some(StatusCode::NOT_FOUND) }
}
