//! Count aggregator - per-image badge counts

use std::collections::HashMap;

use photo_core::{Comment, ImageCounts, ImageId, Reaction};

/// Reaction and comment counts for one image, by linear scan
pub fn counts_for(image_id: &ImageId, reactions: &[Reaction], comments: &[Comment]) -> ImageCounts {
    ImageCounts {
        reaction_count: reactions.iter().filter(|r| &r.image_id == image_id).count(),
        comment_count: comments.iter().filter(|c| &c.image_id == image_id).count(),
    }
}

/// Counts for every image in one snapshot, built in a single pass.
///
/// Answers match [`counts_for`] on the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct CountIndex {
    counts: HashMap<ImageId, ImageCounts>,
}

impl CountIndex {
    pub fn build(reactions: &[Reaction], comments: &[Comment]) -> Self {
        let mut counts: HashMap<ImageId, ImageCounts> = HashMap::new();
        for reaction in reactions {
            counts.entry(reaction.image_id.clone()).or_default().reaction_count += 1;
        }
        for comment in comments {
            counts.entry(comment.image_id.clone()).or_default().comment_count += 1;
        }
        Self { counts }
    }

    /// Counts for `image_id`; zero for images with no activity
    pub fn get(&self, image_id: &ImageId) -> ImageCounts {
        self.counts.get(image_id).copied().unwrap_or_default()
    }

    /// Number of images with any activity
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_core::{Image, RecordId, User, UserColor};

    fn snapshot() -> (Vec<Reaction>, Vec<Comment>) {
        let user = User::new("u1", "alice", UserColor::default());
        let img1 = Image::new("img1", "https://img/1.jpg", "", "");
        let img2 = Image::new("img2", "https://img/2.jpg", "", "");

        let reactions = vec![
            Reaction::new(RecordId::new("r1"), &user, &img1, "❤️", 1),
            Reaction::new(RecordId::new("r2"), &user, &img1, "👍", 2),
            Reaction::new(RecordId::new("r3"), &user, &img2, "❤️", 3),
        ];
        let comments = vec![Comment::new(RecordId::new("c1"), &user, &img2, "ok", 4).unwrap()];
        (reactions, comments)
    }

    #[test]
    fn test_counts_for() {
        let (reactions, comments) = snapshot();
        let img1 = counts_for(&ImageId::new("img1"), &reactions, &comments);
        assert_eq!(img1.reaction_count, 2);
        assert_eq!(img1.comment_count, 0);

        let none = counts_for(&ImageId::new("img9"), &reactions, &comments);
        assert_eq!(none, ImageCounts::default());
    }

    #[test]
    fn test_index_matches_scan() {
        let (reactions, comments) = snapshot();
        let index = CountIndex::build(&reactions, &comments);
        assert_eq!(index.len(), 2);

        for id in ["img1", "img2", "img9"] {
            let id = ImageId::new(id);
            assert_eq!(index.get(&id), counts_for(&id, &reactions, &comments));
        }
    }
}
