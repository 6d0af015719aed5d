//! Per-image live view
//!
//! Binds one image to a store subscription filtered by its id and exposes
//! everything the detail screen shows, recomputed from the latest snapshot.

use photo_core::{
    Comment, Image, ImageCounts, LiveQuery, Query, QueryData, Reaction, ReactionCount, RecordId,
    User,
};

use super::comment::{sort_comments, CommentService};
use super::context::ServiceContext;
use super::counts::counts_for;
use super::error::ServiceResult;
use super::outcome::{MutationOutcome, SkipReason};
use super::reaction::{has_user_reacted, reaction_counts, ReactionService};

/// Reactions and comments of one image, kept current by the store
#[derive(Debug)]
pub struct ImageThread<'a> {
    ctx: &'a ServiceContext,
    image: Image,
    live: LiveQuery,
}

impl<'a> ImageThread<'a> {
    /// Subscribe to `image`'s reactions and comments
    pub fn open(ctx: &'a ServiceContext, image: Image) -> Self {
        let live = ctx.subscribe(Query::for_image(&image.id));
        Self { ctx, image, live }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Raw snapshot for this image
    pub fn snapshot(&self) -> QueryData {
        self.live.current()
    }

    pub fn reactions(&self) -> Vec<Reaction> {
        self.live.current().reactions
    }

    /// Comments, oldest first
    pub fn comments(&self) -> Vec<Comment> {
        sort_comments(self.live.current().comments)
    }

    /// Reaction bar entries as seen by `user`
    pub fn reaction_counts(&self, user: &User) -> Vec<ReactionCount> {
        reaction_counts(&self.reactions(), user)
    }

    pub fn has_user_reacted(&self, user: &User, emoji: &str) -> bool {
        has_user_reacted(emoji, &self.image.id, user, &self.reactions())
    }

    /// Badge counts for this image
    pub fn counts(&self) -> ImageCounts {
        let data = self.live.current();
        counts_for(&self.image.id, &data.reactions, &data.comments)
    }

    /// Toggle `user`'s `emoji` against the snapshot currently held
    pub async fn toggle_reaction(&self, user: &User, emoji: &str) -> ServiceResult<MutationOutcome> {
        let reactions = self.reactions();
        ReactionService::new(self.ctx)
            .toggle_reaction(user, &self.image, emoji, &reactions)
            .await
    }

    pub async fn add_comment(&self, user: &User, raw_text: &str) -> ServiceResult<MutationOutcome> {
        CommentService::new(self.ctx)
            .add_comment(user, &self.image, raw_text)
            .await
    }

    /// Delete `comment_id` as `user`.
    ///
    /// A comment no longer in the snapshot is skipped as `NotFound`.
    pub async fn delete_comment(
        &self,
        user: &User,
        comment_id: &RecordId,
    ) -> ServiceResult<MutationOutcome> {
        let comments = self.live.current().comments;
        match comments.iter().find(|c| &c.id == comment_id) {
            Some(comment) => {
                CommentService::new(self.ctx)
                    .delete_comment(comment_id, user, comment)
                    .await
            }
            None => Ok(MutationOutcome::Skipped(SkipReason::NotFound)),
        }
    }

    /// Wait for the store to push a new snapshot.
    ///
    /// Returns `false` once no further updates can arrive.
    pub async fn changed(&mut self) -> bool {
        self.live.changed().await.is_some()
    }
}
