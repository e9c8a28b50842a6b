//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_tiss::TissError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A generated document did not pass schema validation
    #[error("Generated XML failed validation: {}", errors.join("; "))]
    InvalidDocument { errors: Vec<String> },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Data access error: {0}")]
    DataAccess(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_type, details) = match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            ApiError::InvalidDocument { errors } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", Some(errors))
            }
            ApiError::Unavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", None)
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
            ApiError::DataAccess(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "data_access_error", None)
            }
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<TissError> for ApiError {
    fn from(err: TissError) -> Self {
        match err {
            TissError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            TissError::DataAccess(e) => ApiError::DataAccess(e.to_string()),
            TissError::Serialization(_) | TissError::Provisioning { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
