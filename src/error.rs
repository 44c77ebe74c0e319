//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions in the attendance and payroll-approval core.

use thiserror::Error;

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     what: "person 'p_404'".to_string(),
/// };
/// assert_eq!(error.to_string(), "Not found: person 'p_404'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced person or location does not exist in the caller's scope.
    ///
    /// Also used when a manual-entry name match is absent or ambiguous:
    /// the engine rejects rather than guessing between duplicates.
    #[error("Not found: {what}")]
    NotFound {
        /// Description of what could not be found.
        what: String,
    },

    /// A clock or check transition guard was violated.
    ///
    /// The message distinguishes "already in this state" (a benign
    /// duplicate submission) from other failures so callers can surface
    /// it accordingly.
    #[error("Invalid transition for '{person_id}': {message}")]
    InvalidTransition {
        /// The person whose state rejected the transition.
        person_id: String,
        /// What the guard rejected, e.g. "already clocked in".
        message: String,
    },

    /// The caller's role is not authorized for the requested operation
    /// or target location.
    #[error("Forbidden: role '{role}' may not {operation}")]
    Forbidden {
        /// The caller's role, as a wire-format string.
        role: String,
        /// Description of the refused operation.
        operation: String,
    },

    /// The admin notification was requested before every scoped location
    /// reached approved status.
    #[error("Precondition failed: locations still pending approval: {}", .pending.join(", "))]
    PreconditionFailed {
        /// Locations whose payroll is still pending.
        pending: Vec<String>,
    },

    /// The backing store or notification sink failed.
    #[error("Service unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds a `NotFound` error for a person id.
    pub fn person_not_found(person_id: &str) -> Self {
        EngineError::NotFound {
            what: format!("person '{person_id}'"),
        }
    }

    /// Builds a `NotFound` error for a location key.
    pub fn location_not_found(location: &str) -> Self {
        EngineError::NotFound {
            what: format!("location '{location}'"),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
