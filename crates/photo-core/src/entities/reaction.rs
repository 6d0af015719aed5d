//! Reaction entity - an emoji a user attached to an image

use serde::{Deserialize, Serialize};

use super::{Image, ImageRef, User};
use crate::value_objects::{ImageId, RecordId};

/// The reaction every image offers, pinned first in the reaction bar
pub const DEFAULT_REACTION: &str = "❤️";

/// Emoji offered by the reaction picker, in display order
pub const REACTION_PALETTE: [&str; 20] = [
    "❤️", "👍", "👎", "😄", "😍", "🤔", "😮", "😢", "🔥", "⭐", "🎉", "💯", "👏", "🙌", "🤝", "💪",
    "✨", "🌟", "💖", "😊",
];

/// Reaction record.
///
/// At most one live record exists per `(user_id, emoji, image_id)`. Records
/// are created and deleted, never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: RecordId,
    pub image_id: ImageId,
    pub emoji: String,
    pub user_id: String,
    pub user_name: String,
    pub user_color: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    #[serde(flatten)]
    pub image: ImageRef,
}

impl Reaction {
    /// Create a new Reaction by `user` on `image`
    pub fn new(
        id: RecordId,
        user: &User,
        image: &Image,
        emoji: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            image_id: image.id.clone(),
            emoji: emoji.into(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_color: user.color.to_string(),
            created_at,
            image: image.to_ref(),
        }
    }

    /// Check if reaction uses a specific emoji
    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }

    /// Check if this is `user_id`'s `emoji` reaction on `image_id`
    #[inline]
    pub fn matches(&self, user_id: &str, emoji: &str, image_id: &ImageId) -> bool {
        self.user_id == user_id && self.emoji == emoji && &self.image_id == image_id
    }
}

/// Aggregated reaction count for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionCount {
    pub emoji: String,
    pub count: usize,
    pub me: bool,
}

impl ReactionCount {
    /// Create a new ReactionCount
    pub fn new(emoji: impl Into<String>, count: usize, me: bool) -> Self {
        Self {
            emoji: emoji.into(),
            count,
            me,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::UserColor;

    fn sample() -> Reaction {
        let user = User::new("u1", "alice", UserColor::parse("#112233").unwrap());
        let image = Image::new("img1", "https://x/1.jpg", "https://x/1t.jpg", "dunes");
        Reaction::new(RecordId::new("r1"), &user, &image, "👍", 1000)
    }

    #[test]
    fn test_reaction_creation() {
        let reaction = sample();
        assert_eq!(reaction.image_id, ImageId::new("img1"));
        assert_eq!(reaction.user_id, "u1");
        assert_eq!(reaction.user_name, "alice");
        assert_eq!(reaction.user_color, "#112233");
        assert_eq!(reaction.image.image_description, "dunes");
        assert_eq!(reaction.created_at, 1000);
    }

    #[test]
    fn test_is_emoji() {
        let reaction = sample();
        assert!(reaction.is_emoji("👍"));
        assert!(!reaction.is_emoji("👎"));
    }

    #[test]
    fn test_matches() {
        let reaction = sample();
        let image = ImageId::new("img1");
        assert!(reaction.matches("u1", "👍", &image));
        assert!(!reaction.matches("u2", "👍", &image));
        assert!(!reaction.matches("u1", "❤️", &image));
        assert!(!reaction.matches("u1", "👍", &ImageId::new("img2")));
    }

    #[test]
    fn test_wire_format_is_flat_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["imageId"], "img1");
        assert_eq!(value["userColor"], "#112233");
        assert_eq!(value["thumbUrl"], "https://x/1t.jpg");
        assert_eq!(value["imageDescription"], "dunes");
        assert_eq!(value["createdAt"], 1000);
    }

    #[test]
    fn test_palette_starts_with_default() {
        assert_eq!(REACTION_PALETTE[0], DEFAULT_REACTION);
    }
}
