//! # photo-service
//!
//! Application layer: the identity provider, the reaction and comment
//! engines, and the feed and count projections over live store snapshots.
//!
//! Every engine call takes the acting `User` explicitly, and every mutating
//! call returns a `MutationOutcome` (or the store's rejection) to the caller.

pub mod services;

pub use services::{
    aggregate_feed, can_delete, counts_for, find_user_reaction, group_by_emoji, has_user_reacted,
    reaction_counts, relative_time, sort_comments, Change, CommentService, CountIndex, FeedView,
    IdentityProvider, ImageThread, MutationOutcome, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SkipReason,
};
