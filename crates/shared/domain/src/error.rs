//! Domain-level errors.
//!
//! The closed set of failure kinds the user service can report. They are
//! independent of infrastructure concerns (HTTP, gRPC, database) and are
//! compared by variant, never by message text.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No user matches the requested identifier
    #[error("user not found")]
    NotFound,

    /// A user with the same email is already stored
    #[error("user already exists")]
    AlreadyExists,

    /// Input failed validation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage or transport fault
    #[error("internal server error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
