//! Error handling for the monitor API

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The response body was not the JSON shape we expected.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success status without a structured error body.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The payload carried a top-level `error` field.
    #[error("Server error: {0}")]
    Server(String),
}

impl ApiError {
    /// Message to show the user after a failed mutation.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server(message) => message.clone(),
            ApiError::Http { status, .. } => format!("HTTP {}", status),
            ApiError::Reqwest(e) if e.is_timeout() => "request timed out".to_string(),
            ApiError::Reqwest(_) => "network error".to_string(),
            ApiError::Decode(_) => "invalid response".to_string(),
        }
    }
}
