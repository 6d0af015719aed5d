//! Comment engine
//!
//! Append and delete of per-image text comments, and their display order.

use photo_core::{Collection, Comment, DomainError, Image, Op, RecordId, User};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::outcome::{Change, MutationOutcome, SkipReason};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post `raw_text` (trimmed) as `user`'s comment on `image`.
    ///
    /// Whitespace-only text issues no mutation.
    #[instrument(skip(self, user, image, raw_text), fields(user_id = %user.id, image_id = %image.id))]
    pub async fn add_comment(
        &self,
        user: &User,
        image: &Image,
        raw_text: &str,
    ) -> ServiceResult<MutationOutcome> {
        if !user.has_identity() {
            debug!("Comment skipped: no identity");
            return Ok(MutationOutcome::Skipped(SkipReason::MissingIdentity));
        }

        let comment = match Comment::new(
            RecordId::generate(),
            user,
            image,
            raw_text,
            self.ctx.now_millis(),
        ) {
            Ok(comment) => comment,
            Err(DomainError::EmptyComment) => {
                debug!("Comment skipped: empty text");
                return Ok(MutationOutcome::Skipped(SkipReason::EmptyComment));
            }
            Err(e) => return Err(e.into()),
        };
        let id = comment.id.clone();

        if let Err(e) = self.ctx.store().transact(vec![Op::create(comment)]).await {
            warn!(error = %e, "Comment submission failed");
            return Err(ServiceError::mutation(Collection::Comments, e));
        }

        info!(record_id = %id, "Comment added");

        Ok(MutationOutcome::Applied(Change::Created {
            collection: Collection::Comments,
            id,
        }))
    }

    /// Delete `comment_id` if `comment` was written by `user`.
    ///
    /// The author check only gates the affordance; the store decides.
    #[instrument(skip(self, user, comment), fields(user_id = %user.id))]
    pub async fn delete_comment(
        &self,
        comment_id: &RecordId,
        user: &User,
        comment: &Comment,
    ) -> ServiceResult<MutationOutcome> {
        if !can_delete(comment, user) {
            debug!("Comment delete skipped: not the author");
            return Ok(MutationOutcome::Skipped(SkipReason::NotAuthor));
        }

        let op = Op::delete(Collection::Comments, comment_id.clone());
        if let Err(e) = self.ctx.store().transact(vec![op]).await {
            warn!(error = %e, "Comment delete failed");
            return Err(ServiceError::mutation(Collection::Comments, e));
        }

        info!("Comment deleted");

        Ok(MutationOutcome::Applied(Change::Deleted {
            collection: Collection::Comments,
            id: comment_id.clone(),
        }))
    }
}

/// Whether `user` gets a delete affordance on `comment`
pub fn can_delete(comment: &Comment, user: &User) -> bool {
    user.has_identity() && comment.is_authored_by(&user.id)
}

/// Oldest first; equal timestamps keep their input order
pub fn sort_comments(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by_key(|c| c.created_at);
    comments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use photo_core::{Clock, ImageId, Query, UserColor};
    use photo_store::{InertStore, MemoryStore};

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    fn user(id: &str) -> User {
        User::new(id, "name", UserColor::default())
    }

    fn image() -> Image {
        Image::new("img1", "https://img/1.jpg", "https://img/1t.jpg", "pier")
    }

    fn comment(id: &str, user_id: &str, text: &str, created_at: i64) -> Comment {
        Comment::new(RecordId::new(id), &user(user_id), &image(), text, created_at).unwrap()
    }

    fn live_context() -> (Arc<MemoryStore>, ServiceContext) {
        let store = MemoryStore::new_shared("test");
        let ctx = ServiceContext::builder()
            .store(store.clone())
            .clock(Arc::new(FixedClock(42)))
            .build()
            .unwrap();
        (store, ctx)
    }

    #[tokio::test]
    async fn test_add_comment_trims_and_stamps() {
        let (store, ctx) = live_context();
        let outcome = CommentService::new(&ctx)
            .add_comment(&user("u1"), &image(), "  nice light  ")
            .await
            .unwrap();
        assert!(outcome.is_applied());

        let data = store.snapshot();
        assert_eq!(data.comments.len(), 1);
        let stored = &data.comments[0];
        assert_eq!(stored.text, "nice light");
        assert_eq!(stored.created_at, 42);
        assert_eq!(stored.image.thumb_url, "https://img/1t.jpg");
        assert_eq!(stored.image.image_description, "pier");
    }

    #[tokio::test]
    async fn test_blank_comment_issues_nothing() {
        let (store, ctx) = live_context();
        let outcome = CommentService::new(&ctx)
            .add_comment(&user("u1"), &image(), " \n\t ")
            .await
            .unwrap();

        assert_eq!(outcome, MutationOutcome::Skipped(SkipReason::EmptyComment));
        assert_eq!(store.version(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_author() {
        let (store, ctx) = live_context();
        let service = CommentService::new(&ctx);
        service.add_comment(&user("u1"), &image(), "mine").await.unwrap();
        let posted = store.snapshot().comments[0].clone();

        let outcome = service
            .delete_comment(&posted.id, &user("u2"), &posted)
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Skipped(SkipReason::NotAuthor));
        assert_eq!(store.len(Collection::Comments), 1);

        let outcome = service
            .delete_comment(&posted.id, &user("u1"), &posted)
            .await
            .unwrap();
        assert!(outcome.is_applied());
        assert_eq!(store.len(Collection::Comments), 0);
    }

    #[tokio::test]
    async fn test_add_comment_on_inert_store() {
        let ctx = ServiceContext::builder()
            .store(Arc::new(InertStore::new()))
            .build()
            .unwrap();
        let outcome = CommentService::new(&ctx)
            .add_comment(&user("u1"), &image(), "hello")
            .await
            .unwrap();
        assert!(outcome.is_applied());

        let live = ctx.subscribe(Query::for_image(&ImageId::new("img1")));
        assert!(live.current().comments.is_empty());
    }

    #[test]
    fn test_sort_comments() {
        let sorted = sort_comments(vec![
            comment("c1", "u1", "hi", 100),
            comment("c2", "u1", "yo", 50),
            comment("c3", "u2", "same", 100),
        ]);
        let ids: Vec<&str> = sorted.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c1", "c3"]);

        let again = sort_comments(sorted.clone());
        assert_eq!(again, sorted);
    }

    #[test]
    fn test_can_delete() {
        let c = comment("c1", "u1", "hi", 1);
        assert!(can_delete(&c, &user("u1")));
        assert!(!can_delete(&c, &user("u2")));
    }
}
