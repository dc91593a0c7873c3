//! Unified error handling for gRPC and GraphQL.
//!
//! Provides a single error type that can be converted to:
//! - Tonic gRPC status codes
//! - async-graphql errors carrying an `extensions.code`
//! - Domain errors (infrastructure faults collapse into `Internal`)
//!
//! Internal details are logged once, when a client-facing message is built.

use domain::DomainError;
use thiserror::Error;
use tonic::Status;

/// Application error types with support for both gRPC and GraphQL.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("User not found")]
    NotFound,

    #[error("{0} already exists")]
    AlreadyExists(String),

    // Validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "cache")]
    #[error("Cache error")]
    Cache(#[from] redis::RedisError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::InvalidInput(msg) => format!("Invalid input: {}", msg),

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal error occurred".to_string()
            }
            #[cfg(feature = "cache")]
            AppError::Cache(e) => {
                tracing::error!("Cache error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::NotFound => tonic::Code::NotFound,
            AppError::AlreadyExists(_) => tonic::Code::AlreadyExists,
            AppError::InvalidInput(_) => tonic::Code::InvalidArgument,
            _ => tonic::Code::Internal,
        };

        Status::new(code, err.user_message())
    }
}

// =============================================================================
// GraphQL Error (async-graphql)
// =============================================================================

#[cfg(feature = "graphql")]
impl async_graphql::ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.user_message()).extend_with(|_, e| e.set("code", code))
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => AppError::NotFound,
            DomainError::AlreadyExists => AppError::AlreadyExists("User".to_string()),
            DomainError::InvalidInput(msg) => AppError::InvalidInput(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound => DomainError::NotFound,
            AppError::AlreadyExists(_) => DomainError::AlreadyExists,
            AppError::InvalidInput(msg) => DomainError::InvalidInput(msg),
            #[cfg(feature = "database")]
            AppError::Database(e) => DomainError::Internal(format!("database error: {}", e)),
            #[cfg(feature = "cache")]
            AppError::Cache(e) => DomainError::Internal(format!("cache error: {}", e)),
            AppError::Internal(msg) => DomainError::Internal(msg),
        }
    }
}
