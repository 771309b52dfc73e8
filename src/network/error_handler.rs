//! Centralized error classification

use crate::api::error::ApiError;
use crate::logging::LogLevel;

/// Maps API failures to the level they are recorded at in diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify error and determine appropriate log level
    pub fn classify_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Rate limiting - low priority
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Wrong credentials - nothing will load until fixed
            ApiError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,

            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Backend reported a failure of its own collectors
            ApiError::Server(_) => LogLevel::Warn,

            // Shape mismatch between client and backend
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            ApiError::Reqwest(_) => LogLevel::Warn,

            _ => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_error() {
        let handler = ErrorHandler::new();
        assert_eq!(handler.classify_error(&http(429)), LogLevel::Debug);
        assert_eq!(handler.classify_error(&http(401)), LogLevel::Error);
        assert_eq!(handler.classify_error(&http(503)), LogLevel::Warn);
        assert_eq!(
            handler.classify_error(&ApiError::Server("disk".to_string())),
            LogLevel::Warn
        );
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(
            handler.classify_error(&ApiError::Decode(decode)),
            LogLevel::Error
        );
    }
}
