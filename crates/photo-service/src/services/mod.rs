//! Engines and projections
//!
//! Mutating engines (`ReactionService`, `CommentService`) borrow a
//! `ServiceContext`; projections are free functions over snapshot slices.

pub mod comment;
pub mod context;
pub mod counts;
pub mod error;
pub mod feed;
pub mod identity;
pub mod outcome;
pub mod reaction;
pub mod thread;

pub use comment::{can_delete, sort_comments, CommentService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use counts::{counts_for, CountIndex};
pub use error::{ServiceError, ServiceResult};
pub use feed::{aggregate_feed, relative_time, FeedView};
pub use identity::IdentityProvider;
pub use outcome::{Change, MutationOutcome, SkipReason};
pub use reaction::{
    find_user_reaction, group_by_emoji, has_user_reacted, reaction_counts, ReactionService,
};
pub use thread::ImageThread;
