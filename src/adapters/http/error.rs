//! Domain error to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

/// Wrapper turning a `DomainError` into an HTTP response.
///
/// Validation and business-rule violations are the caller's fault (400),
/// missing aggregates are 404, bad credentials 401, everything else is a
/// 500 with the message withheld from the body.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    /// Converts any handler error that maps into a `DomainError`.
    pub fn of(err: impl Into<DomainError>) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.code {
            ErrorCode::ValidationFailed | ErrorCode::BusinessRule => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            code if code.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %err.code, message = %err.message, "request failed");
            ErrorResponse {
                code: err.code.to_string(),
                message: "Internal server error".to_string(),
                details: HashMap::new(),
            }
        } else {
            ErrorResponse {
                code: err.code.to_string(),
                message: err.message,
                details: err.details,
            }
        };

        (status, Json(body)).into_response()
    }
}
