//! Errors surfaced by remote calls.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{} (HTTP {status})", .message.as_deref().unwrap_or("Request failed"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a status error from a non-success response body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            message: message_from_body(body),
        }
    }

    /// The server-supplied `message`, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Server message or `fallback`, for operator-facing text.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

/// Extract the `message` string of a JSON error body.
pub fn message_from_body(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
