//! Comment entity - a text note a user attached to an image

use serde::{Deserialize, Serialize};

use super::{Image, ImageRef, User};
use crate::error::DomainError;
use crate::value_objects::{ImageId, RecordId};

/// Comment record. `text` is never empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: RecordId,
    pub image_id: ImageId,
    pub text: String,
    pub user_id: String,
    pub user_name: String,
    pub user_color: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    #[serde(flatten)]
    pub image: ImageRef,
}

impl Comment {
    /// Create a new Comment from raw input text.
    ///
    /// The text is trimmed; whitespace-only input is rejected.
    pub fn new(
        id: RecordId,
        user: &User,
        image: &Image,
        raw_text: &str,
        created_at: i64,
    ) -> Result<Self, DomainError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyComment);
        }

        Ok(Self {
            id,
            image_id: image.id.clone(),
            text: text.to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_color: user.color.to_string(),
            created_at,
            image: image.to_ref(),
        })
    }

    /// Check if `user_id` wrote this comment
    #[inline]
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
