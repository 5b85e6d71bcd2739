//! Site Error Types
//!
//! Error types for the public portfolio site and their conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::api::ApiError;

/// Site error types
#[derive(Error, Debug)]
pub enum SiteError {
    /// Unknown portfolio
    #[error("Not found: {0}")]
    NotFound(String),

    /// The portfolio API failed or answered nonsense
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The portfolio API could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for SiteError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(message) => SiteError::NotFound(message),
            ApiError::Unavailable | ApiError::Timeout => {
                SiteError::ServiceUnavailable(err.to_string())
            }
            other => SiteError::Upstream(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl SiteError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            SiteError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            SiteError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            SiteError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            SiteError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            SiteError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Site error occurred"
            );
        } else {
            tracing::debug!(request_id = %request_id, error_code = %code, "{}", self);
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for site handlers
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_map_to_gateway_statuses() {
        let not_found: SiteError = ApiError::NotFound("ada".to_string()).into();
        assert_eq!(not_found.status_and_code().0, StatusCode::NOT_FOUND);

        let down: SiteError = ApiError::Unavailable.into();
        assert_eq!(down.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);

        let broken: SiteError = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(broken.status_and_code().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_into_response_status() {
        let response = SiteError::NotFound("ada".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
