//! Service layer error types

use photo_common::AppError;
use photo_core::{Collection, DomainError};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (config, provider)
    App(AppError),

    /// The store rejected a batch
    Mutation {
        collection: Collection,
        reason: String,
    },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Mutation { collection, reason } => {
                write!(f, "Mutation on {collection} failed: {reason}")
            }
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Wrap a store failure for a batch touching `collection`
    pub fn mutation(collection: Collection, err: DomainError) -> Self {
        let reason = match err {
            DomainError::MutationRejected(reason) => reason,
            other => other.to_string(),
        };
        Self::Mutation { collection, reason }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Mutation { .. } => "MUTATION_FAILED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether issuing the same call again could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Mutation { .. } => true,
            Self::Domain(e) => e.is_store(),
            Self::App(e) => e.is_transient(),
            Self::Validation(_) | Self::Internal(_) => false,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Mutation { collection, reason } => {
                AppError::Store(format!("{collection}: {reason}"))
            }
            ServiceError::Validation(msg) => AppError::InvalidInput(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
