//! Reaction engine
//!
//! Toggle semantics for a `(user, image, emoji)` tuple and the projections
//! the reaction bar is drawn from.
//!
//! A toggle is a read-then-write against the snapshot the caller last saw.
//! Two toggles issued before that snapshot refreshes can both create (two
//! records for one tuple) or both delete (the second is a no-op in the
//! store). With `ToggleStrategy::Deterministic` the created id is derived
//! from the tuple, so duplicate creates land on the same record.

use std::collections::BTreeMap;

use photo_common::ToggleStrategy;
use photo_core::{
    Collection, Image, ImageId, Op, Reaction, ReactionCount, RecordId, User, DEFAULT_REACTION,
};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::outcome::{Change, MutationOutcome, SkipReason};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Decide what a toggle against `snapshot` would submit
    pub fn plan_toggle(
        &self,
        user: &User,
        image: &Image,
        emoji: &str,
        snapshot: &[Reaction],
    ) -> Result<Op, SkipReason> {
        if !user.has_identity() {
            return Err(SkipReason::MissingIdentity);
        }
        if emoji.trim().is_empty() {
            return Err(SkipReason::EmptyEmoji);
        }

        if let Some(existing) = find_user_reaction(user, &image.id, emoji, snapshot) {
            return Ok(Op::delete(Collection::Reactions, existing.id.clone()));
        }

        let id = match self.ctx.toggle_strategy() {
            ToggleStrategy::Snapshot => RecordId::generate(),
            ToggleStrategy::Deterministic => RecordId::for_reaction(&user.id, emoji, &image.id),
        };
        let reaction = Reaction::new(id, user, image, emoji, self.ctx.now_millis());
        Ok(Op::create(reaction))
    }

    /// Add `user`'s `emoji` reaction to `image`, or remove it if `snapshot`
    /// already holds one.
    ///
    /// Nothing is merged locally; the change shows up in the next snapshot
    /// the store pushes.
    #[instrument(skip(self, user, image, snapshot), fields(user_id = %user.id, image_id = %image.id))]
    pub async fn toggle_reaction(
        &self,
        user: &User,
        image: &Image,
        emoji: &str,
        snapshot: &[Reaction],
    ) -> ServiceResult<MutationOutcome> {
        let op = match self.plan_toggle(user, image, emoji, snapshot) {
            Ok(op) => op,
            Err(reason) => {
                debug!(%reason, "Reaction toggle skipped");
                return Ok(MutationOutcome::Skipped(reason));
            }
        };

        let id = op.record_id().clone();
        let change = match &op {
            Op::Create(_) => Change::Created {
                collection: Collection::Reactions,
                id,
            },
            Op::Delete { .. } => Change::Deleted {
                collection: Collection::Reactions,
                id,
            },
        };

        if let Err(e) = self.ctx.store().transact(vec![op]).await {
            warn!(error = %e, "Reaction toggle failed");
            return Err(ServiceError::mutation(Collection::Reactions, e));
        }

        info!(
            record_id = %change.id(),
            created = change.is_create(),
            "Reaction toggled"
        );

        Ok(MutationOutcome::Applied(change))
    }
}

/// `user`'s `emoji` reaction on `image_id`, if `snapshot` holds one
pub fn find_user_reaction<'r>(
    user: &User,
    image_id: &ImageId,
    emoji: &str,
    snapshot: &'r [Reaction],
) -> Option<&'r Reaction> {
    snapshot
        .iter()
        .find(|r| r.matches(&user.id, emoji, image_id))
}

/// Whether `user` has reacted to `image_id` with `emoji` in `snapshot`
pub fn has_user_reacted(emoji: &str, image_id: &ImageId, user: &User, snapshot: &[Reaction]) -> bool {
    find_user_reaction(user, image_id, emoji, snapshot).is_some()
}

/// Partition reactions by emoji
pub fn group_by_emoji(reactions: &[Reaction]) -> BTreeMap<&str, Vec<&Reaction>> {
    let mut groups: BTreeMap<&str, Vec<&Reaction>> = BTreeMap::new();
    for reaction in reactions {
        groups.entry(reaction.emoji.as_str()).or_default().push(reaction);
    }
    groups
}

/// Counts for the reaction bar of one image.
///
/// The default reaction always comes first (possibly with a zero count);
/// other emoji follow in the order they first appear in `reactions`.
pub fn reaction_counts(reactions: &[Reaction], user: &User) -> Vec<ReactionCount> {
    let mut counts = vec![ReactionCount::new(DEFAULT_REACTION, 0, false)];

    for reaction in reactions {
        let slot = match counts.iter().position(|c| c.emoji == reaction.emoji) {
            Some(i) => i,
            None => {
                counts.push(ReactionCount::new(reaction.emoji.clone(), 0, false));
                counts.len() - 1
            }
        };
        let entry = &mut counts[slot];
        entry.count += 1;
        entry.me |= reaction.user_id == user.id;
    }

    counts
}
