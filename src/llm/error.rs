//! Backend error type shared by all text-completion clients

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while talking to a text-completion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Authentication failed or credentials are invalid
    AuthenticationError { message: String },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Rate limit exceeded, retry after the specified duration (in seconds)
    RateLimitError { retry_after: Option<u64> },

    /// Invalid or malformed response from the LLM
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    /// Configuration error (missing API keys, invalid settings, etc.)
    ConfigurationError { message: String },

    /// Network-related error
    NetworkError { message: String },

    /// Generic error for other cases
    Other { message: String },
}

impl BackendError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Client-side 4xx responses, bad credentials and malformed output are
    /// permanent; transport trouble and server-side errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::ApiError { status_code, .. } => match status_code {
                Some(code) => *code >= 500 || *code == 408,
                None => true,
            },
            BackendError::TimeoutError { .. }
            | BackendError::RateLimitError { .. }
            | BackendError::NetworkError { .. } => true,
            BackendError::AuthenticationError { .. }
            | BackendError::InvalidResponse { .. }
            | BackendError::ConfigurationError { .. }
            | BackendError::Other { .. } => false,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::AuthenticationError { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::RateLimitError { retry_after } => {
                if let Some(seconds) = retry_after {
                    write!(f, "Rate limit exceeded, retry after {} seconds", seconds)
                } else {
                    write!(f, "Rate limit exceeded")
                }
            }
            BackendError::InvalidResponse { message, .. } => {
                write!(f, "Invalid response from LLM: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let error = BackendError::ApiError {
            message: "Test error".to_string(),
            status_code: Some(500),
        };
        assert!(error.to_string().contains("500"));
        assert!(error.to_string().contains("Test error"));

        let error = BackendError::RateLimitError { retry_after: None };
        assert_eq!(error.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_transport_errors_are_retryable() {
        assert!(BackendError::TimeoutError { seconds: 30 }.is_retryable());
        assert!(BackendError::RateLimitError {
            retry_after: Some(2)
        }
        .is_retryable());
        assert!(BackendError::NetworkError {
            message: "connection reset".to_string()
        }
        .is_retryable());
        assert!(BackendError::ApiError {
            message: "bad gateway".to_string(),
            status_code: Some(502),
        }
        .is_retryable());
    }

    #[test]
    fn test_permanent_errors_are_not_retryable() {
        assert!(!BackendError::AuthenticationError {
            message: "invalid key".to_string()
        }
        .is_retryable());
        assert!(!BackendError::ApiError {
            message: "bad request".to_string(),
            status_code: Some(400),
        }
        .is_retryable());
        assert!(!BackendError::InvalidResponse {
            message: "empty".to_string(),
            raw_response: None,
        }
        .is_retryable());
    }
}
