//! Feed item - display-oriented union over reactions and comments
//!
//! Feed items are derived from store snapshots and never persisted.

use serde::Serialize;

use super::{Comment, ImageRef, Reaction};
use crate::value_objects::ImageId;

/// Description shown when a record carries none
const FALLBACK_DESCRIPTION: &str = "Image";

/// What happened in a feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedKind {
    Reaction { emoji: String },
    Comment { text: String },
}

/// One entry of the activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// `reaction-<id>` or `comment-<id>`
    pub id: String,
    #[serde(flatten)]
    pub kind: FeedKind,
    pub user_id: String,
    pub user_name: String,
    pub user_color: String,
    pub image_id: ImageId,
    #[serde(flatten)]
    pub image: ImageRef,
    pub created_at: i64,
}

impl FeedItem {
    #[inline]
    pub fn is_reaction(&self) -> bool {
        matches!(self.kind, FeedKind::Reaction { .. })
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, FeedKind::Comment { .. })
    }

    /// Description to show next to the thumbnail
    pub fn display_description(&self) -> &str {
        if self.image.image_description.is_empty() {
            FALLBACK_DESCRIPTION
        } else {
            &self.image.image_description
        }
    }
}

impl From<&Reaction> for FeedItem {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: format!("reaction-{}", reaction.id),
            kind: FeedKind::Reaction {
                emoji: reaction.emoji.clone(),
            },
            user_id: reaction.user_id.clone(),
            user_name: reaction.user_name.clone(),
            user_color: reaction.user_color.clone(),
            image_id: reaction.image_id.clone(),
            image: reaction.image.clone(),
            created_at: reaction.created_at,
        }
    }
}

impl From<&Comment> for FeedItem {
    fn from(comment: &Comment) -> Self {
        Self {
            id: format!("comment-{}", comment.id),
            kind: FeedKind::Comment {
                text: comment.text.clone(),
            },
            user_id: comment.user_id.clone(),
            user_name: comment.user_name.clone(),
            user_color: comment.user_color.clone(),
            image_id: comment.image_id.clone(),
            image: comment.image.clone(),
            created_at: comment.created_at,
        }
    }
}
