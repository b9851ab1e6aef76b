//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised synchronously when user-supplied input is rejected.
///
/// A validation failure never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid state transition error.
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        ValidationError::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }
}
