//! Error types for the docchat application.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire docchat application.
///
/// This provides typed, structured error variants with constructor helpers
/// so callers can build errors without spelling out struct fields.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum DocchatError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Input rejected before any state change or network activity
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation attempted in the wrong session state
    #[error("Invalid session state: expected {expected}, was {actual}")]
    State {
        expected: &'static str,
        actual: String,
    },

    /// No authenticated identity is present
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Backend request failed (network error or non-success status)
    #[error("Backend error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Backend {
        /// HTTP status, if the request made it to the server
        status: Option<u16>,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocchatError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a State error
    pub fn state(expected: &'static str, actual: impl Into<String>) -> Self {
        Self::State {
            expected,
            actual: actual.into(),
        }
    }

    /// Creates a Backend error for a transport-level failure (no HTTP status)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Backend {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Backend error for a non-success HTTP status
    pub fn backend_status(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Convenient result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DocchatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = DocchatError::not_found("document", "a.pdf");
        assert_eq!(err.to_string(), "Entity not found: document 'a.pdf'");
    }

    #[test]
    fn test_backend_display_with_and_without_status() {
        let with = DocchatError::backend_status(500, "boom");
        assert_eq!(with.to_string(), "Backend error (status 500): boom");

        let without = DocchatError::transport("connection refused");
        assert_eq!(without.to_string(), "Backend error: connection refused");
    }
}
