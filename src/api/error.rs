//! API error types mapping engine errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::EngineError;

/// API error type that converts to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error (422)
    #[error("Validation failed: {message}")]
    Validation {
        /// What failed validation
        message: String,
        /// Offending field, when known
        field: Option<String>,
    },

    /// Invalid request data (400)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Why the request was rejected
        message: String,
    },

    /// Session not found (404)
    #[error("No session for user {user_id}")]
    SessionNotFound {
        /// The unknown user id
        user_id: String,
    },

    /// Engine error from the core
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>, field: Option<String>) -> Self {
        Self::Validation { message: message.into(), field }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::SessionNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Engine(engine) => match engine {
                EngineError::InvalidInputRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                EngineError::UnknownSetting(_) => StatusCode::BAD_REQUEST,
                EngineError::EmptySignal { .. } | EngineError::Computation(_) => {
                    StatusCode::BAD_REQUEST
                }
            },
        }
    }

    /// Machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::SessionNotFound { .. } => "SESSION_NOT_FOUND",
            Self::Engine(engine) => match engine {
                EngineError::InvalidInputRange { .. } => "INVALID_INPUT_RANGE",
                EngineError::UnknownSetting(_) => "UNKNOWN_SETTING",
                EngineError::EmptySignal { .. } => "EMPTY_SIGNAL",
                EngineError::Computation(_) => "COMPUTATION_FAILURE",
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field that caused the error, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();
        let message = self.to_string();

        let field = match &self {
            ApiError::Validation { field, .. } => field.clone(),
            ApiError::Engine(EngineError::InvalidInputRange { field, .. }) => {
                Some((*field).to_string())
            }
            _ => None,
        };

        tracing::warn!(error = %self, code = %code, "API error");

        let body = ErrorResponse { code, message, field };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Modality;

    #[test]
    fn test_engine_error_status_mapping() {
        let err: ApiError = EngineError::InvalidInputRange {
            field: "sound_level",
            value: 120.0,
            min: 0.0,
            max: 100.0,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "INVALID_INPUT_RANGE");

        let err: ApiError = EngineError::UnknownSetting("brightness".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = EngineError::EmptySignal { modality: Modality::Audio }.into();
        assert_eq!(err.error_code(), "EMPTY_SIGNAL");
    }

    #[test]
    fn test_session_not_found_is_404() {
        let err = ApiError::SessionNotFound { user_id: "nobody".into() };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
