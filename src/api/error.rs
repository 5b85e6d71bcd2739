//! API Client Error Types
//!
//! Errors raised while talking to the portfolio REST API, plus the
//! user-facing message each one turns into.

use thiserror::Error;

use crate::forms::ValidationErrors;

/// Fallback shown when the server did not supply a usable message
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Errors that can occur when communicating with the REST API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server could not be reached
    #[error("API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure that is neither a timeout nor a refused connection
    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    /// 401, or no session when one is required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success status or failure envelope
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A `:param` placeholder had no value
    #[error("Missing path parameter: {0}")]
    MissingPathParam(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client-side validation failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Operation not offered for this entity
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Request(e)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl ApiError {
    /// Message suitable for a toast: the server's own text when it sent one,
    /// otherwise a generic fallback
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } | ApiError::NotFound(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            ApiError::Unauthorized(message) if !message.trim().is_empty() => message.clone(),
            ApiError::Unauthorized(_) => "Session expired, please log in again".to_string(),
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::Unavailable => "Cannot reach the portfolio API".to_string(),
            ApiError::Timeout => "The portfolio API took too long to respond".to_string(),
            ApiError::Unsupported(what) => what.clone(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Result type for API client operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Api {
            status: 409,
            message: "Title already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Title already exists");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::Api {
            status: 500,
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR);

        let err = ApiError::Decode("expected value".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::MissingPathParam("id".to_string());
        assert_eq!(err.to_string(), "Missing path parameter: id");
    }
}
