//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::ColorParseError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Comment text is empty")]
    EmptyComment,

    #[error("Emoji is empty")]
    EmptyEmoji,

    #[error("No resolved user identity")]
    MissingIdentity,

    #[error("Invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    // =========================================================================
    // Authorship Errors
    // =========================================================================
    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Store Errors
    // =========================================================================
    #[error("Store is not configured")]
    StoreUnavailable,

    #[error("Mutation rejected by store: {0}")]
    MutationRejected(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            // Validation
            Self::EmptyComment => "EMPTY_COMMENT",
            Self::EmptyEmoji => "EMPTY_EMOJI",
            Self::MissingIdentity => "MISSING_IDENTITY",
            Self::InvalidColor(_) => "INVALID_COLOR",

            // Authorship
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Store
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::MutationRejected(_) => "MUTATION_REJECTED",

            // Infrastructure
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyComment | Self::EmptyEmoji | Self::MissingIdentity | Self::InvalidColor(_)
        )
    }

    /// Check if this error came from the synchronized store
    pub fn is_store(&self) -> bool {
        matches!(self, Self::StoreUnavailable | Self::MutationRejected(_))
    }
}
