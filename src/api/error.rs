use serde_json::{Value, json};
use thiserror::Error;

/// Every way a backend call can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Api {
        status: u16,
        payload: Value,
        message: String,
    },
    /// The request never completed (DNS, refused connection, reset)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A 2xx response whose body didn't match the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),
    /// Rejected before anything was sent
    #[error("Invalid request: {0}")]
    Validation(String),
}

impl ApiError {
    /// Builds the typed error for a non-2xx response. The body is
    /// parsed as JSON when possible and replaced by `{}` otherwise.
    /// Message precedence: `message` > the payload's `error` string >
    /// `API Error: <status>`.
    pub fn from_response(status: u16, body: &str, message: Option<String>) -> Self {
        let payload = serde_json::from_str::<Value>(body).unwrap_or_else(|_| json!({}));
        let message = message
            .or_else(|| {
                payload
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("API Error: {}", status));

        Self::Api {
            status,
            payload,
            message,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status for typed API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether trying the same request again could succeed. The
    /// client never retries on its own; this is for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Transport(_) => true,
            Self::Decode(_) | Self::Validation(_) => false,
        }
    }
}
