//! Response types for the engagement analysis API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<AnalysisError> for ApiErrorResponse {
    fn from(error: AnalysisError) -> Self {
        let message = error.to_string();
        let (status, code) = match error {
            AnalysisError::ConfigNotFound { .. }
            | AnalysisError::ConfigParseError { .. }
            | AnalysisError::InvalidConfig { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            AnalysisError::InputNotFound { .. }
            | AnalysisError::InputRead { .. }
            | AnalysisError::MissingColumn { .. } => (StatusCode::BAD_REQUEST, "INPUT_ERROR"),
            AnalysisError::SchemaMismatch { .. } => (StatusCode::BAD_REQUEST, "SCHEMA_MISMATCH"),
            AnalysisError::OutputWrite { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "OUTPUT_ERROR"),
            AnalysisError::ContextInit { .. } | AnalysisError::Server { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
