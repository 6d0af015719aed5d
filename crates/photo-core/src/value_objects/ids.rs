//! Identifiers for store records and provider images.
//!
//! Both are opaque strings on the wire. Record ids are minted locally (random
//! UUIDs, or a name-based UUID derived from the reaction uniqueness tuple);
//! image ids come from the image provider and are never generated here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace for name-based reaction ids
const REACTION_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_4b7d_4e0a_9c3f_5d82_17a4_b6e1);

/// Identifier of a record in the synchronized store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a RecordId from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Derive the id of the single reaction a user may hold for an emoji on an image.
    ///
    /// The same tuple always maps to the same id, so two concurrent creates
    /// collapse into one record inside the store.
    pub fn for_reaction(user_id: &str, emoji: &str, image_id: &ImageId) -> Self {
        let name = format!("{user_id}\u{1f}{emoji}\u{1f}{}", image_id.as_str());
        Self(Uuid::new_v5(&REACTION_NAMESPACE, name.as_bytes()).to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of an image as assigned by the image provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ImageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for ImageId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
