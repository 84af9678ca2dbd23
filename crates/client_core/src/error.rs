use std::fmt;

use reqwest::StatusCode;
use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

/// The request a [`ClientError`] came from, used to word the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Fetch,
    Create,
    Replace,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::List => "load students",
            Action::Fetch => "load student",
            Action::Create => "create student",
            Action::Replace => "update student",
            Action::Delete => "delete student",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid collection url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to {action}: {source}")]
    Transport {
        action: Action,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to {action}: server responded with {status}")]
    Rejected { action: Action, status: StatusCode },
    #[error("failed to {action}: unexpected response body: {source}")]
    Decode {
        action: Action,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::InvalidBaseUrl { .. } => ErrorCode::Validation,
            ClientError::Transport { .. } => ErrorCode::Transport,
            ClientError::Rejected { status, .. } => ErrorCode::from_status(status.as_u16()),
            ClientError::Decode { .. } => ErrorCode::Internal,
        }
    }
}

impl From<&ClientError> for ApiError {
    fn from(value: &ClientError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}
