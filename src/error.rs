//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::Notice;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Session errors
    #[error("No code to test")]
    NoCodeToTest,

    #[error("All test cases must pass before submission")]
    TestsNotPassed,

    // Auth collaborator errors (message is the collaborator's, verbatim)
    #[error("{0}")]
    Auth(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Simulated pipeline errors
    #[error("Simulation error: {0}")]
    Simulation(String),

    // Internal errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoCodeToTest => "NO_CODE_TO_TEST",
            Self::TestsNotPassed => "TESTS_NOT_PASSED",
            Self::Auth(_) => "AUTH_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Simulation(_) => "SIMULATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoCodeToTest | Self::TestsNotPassed => StatusCode::CONFLICT,
            Self::Auth(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Simulation(_) | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The blocking notice shown to the user for session rejections
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::NoCodeToTest => Some(Notice::destructive(
                "No Code to Test",
                "Please generate code first before running tests.",
            )),
            Self::TestsNotPassed => Some(Notice::destructive(
                "Cannot Submit",
                "All test cases must pass before submission.",
            )),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Configuration(e) => {
                tracing::error!("Configuration error: {}", e);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let details = self
            .notice()
            .and_then(|notice| serde_json::to_value(notice).ok());

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeVariant;

    #[test]
    fn test_session_rejections_map_to_conflict() {
        assert_eq!(AppError::NoCodeToTest.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::TestsNotPassed.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NoCodeToTest.error_code(), "NO_CODE_TO_TEST");
    }

    #[test]
    fn test_rejections_carry_destructive_notice() {
        let notice = AppError::TestsNotPassed.notice().unwrap();
        assert_eq!(notice.title, "Cannot Submit");
        assert_eq!(notice.variant, NoticeVariant::Destructive);

        assert!(AppError::NotFound("x".into()).notice().is_none());
    }

    #[test]
    fn test_auth_message_is_verbatim() {
        let err = AppError::Auth("Invalid login credentials".to_string());
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_configuration_error_is_masked() {
        let response = AppError::Configuration("catalog is empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
        assert!(body["error"].get("details").is_none());
    }
}
