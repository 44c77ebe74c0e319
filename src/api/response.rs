//! Response types for the attendance engine API.
//!
//! This module defines the success envelopes, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{LocationPayrollStatus, RosterEntry};

/// Success envelope for clock and manual-entry operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    /// Human-readable confirmation, e.g. "Clock-in successful".
    pub message: String,
    /// The updated roster entry for the affected person.
    pub data: RosterEntry,
}

/// Success envelope for the approve-location operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveResponse {
    /// Always `"success"` on the success path; failures use the error
    /// body instead.
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
    /// The location's approval record after the call.
    pub approval: LocationPayrollStatus,
}

/// Success envelope for the notify-admin operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The id of the emitted notification, for audit correlation.
    pub notification_id: Uuid,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
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

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::NotFound { ref what } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "NOT_FOUND",
                    error.to_string(),
                    format!("No {what} exists in the caller's scope"),
                ),
            },
            EngineError::InvalidTransition { ref message, .. } => {
                let details = if message.starts_with("already") {
                    "Already in the requested state; this is usually a duplicate submission"
                } else {
                    "The current clock state does not permit this action"
                };
                ApiErrorResponse {
                    status: StatusCode::CONFLICT,
                    error: ApiError::with_details("INVALID_TRANSITION", error.to_string(), details),
                }
            }
            EngineError::Forbidden { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::with_details(
                    "FORBIDDEN",
                    error.to_string(),
                    "The caller's role is not authorized for this operation or location",
                ),
            },
            EngineError::PreconditionFailed { .. } => ApiErrorResponse {
                status: StatusCode::PRECONDITION_FAILED,
                error: ApiError::with_details(
                    "PRECONDITION_FAILED",
                    error.to_string(),
                    "Every location in scope must be approved before notifying the admin",
                ),
            },
            EngineError::Unavailable { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "UNAVAILABLE",
                    error.to_string(),
                    "A backing service failed; the request may be retried",
                ),
            },
            EngineError::ConfigNotFound { ref path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {path}"),
                ),
            },
            EngineError::ConfigParseError { ref path, ref message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {path}: {message}"),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = EngineError::person_not_found("p_1").into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NOT_FOUND");
    }

    #[test]
    fn test_invalid_transition_maps_to_409() {
        let response: ApiErrorResponse = EngineError::InvalidTransition {
            person_id: "p_1".to_string(),
            message: "already clocked in".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert!(response.error.details.unwrap().contains("duplicate submission"));
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let response: ApiErrorResponse = EngineError::Forbidden {
            role: "staff".to_string(),
            operation: "approve payroll".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.error.code, "FORBIDDEN");
    }

    #[test]
    fn test_precondition_failed_maps_to_412() {
        let response: ApiErrorResponse = EngineError::PreconditionFailed {
            pending: vec!["Everett".to_string()],
        }
        .into();
        assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
        assert!(response.error.message.contains("Everett"));
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let response: ApiErrorResponse = EngineError::Unavailable {
            message: "store down".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.error.code, "UNAVAILABLE");
    }
}
