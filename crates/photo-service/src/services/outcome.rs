//! Explicit results of mutating engine calls

use photo_core::{Collection, RecordId};
use serde::Serialize;
use std::fmt;

/// What a mutating call did.
///
/// A store rejection is not an outcome; it comes back as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum MutationOutcome {
    /// A mutation was submitted and the store accepted it
    Applied(Change),
    /// Nothing was submitted
    Skipped(SkipReason),
}

/// The operation the store accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Change {
    Created { collection: Collection, id: RecordId },
    Deleted { collection: Collection, id: RecordId },
}

/// Why a call issued no mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyEmoji,
    EmptyComment,
    MissingIdentity,
    NotAuthor,
    NotFound,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn change(&self) -> Option<&Change> {
        match self {
            Self::Applied(change) => Some(change),
            Self::Skipped(_) => None,
        }
    }
}

impl Change {
    /// Id of the record created or deleted
    pub fn id(&self) -> &RecordId {
        match self {
            Self::Created { id, .. } | Self::Deleted { id, .. } => id,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EmptyEmoji => "empty emoji",
            Self::EmptyComment => "empty comment",
            Self::MissingIdentity => "no user identity",
            Self::NotAuthor => "not the author",
            Self::NotFound => "no such record",
        };
        f.write_str(s)
    }
}
