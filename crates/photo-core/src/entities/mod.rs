//! Domain entities - core business objects

mod comment;
mod feed;
mod image;
mod reaction;
mod user;

pub use comment::Comment;
pub use feed::{FeedItem, FeedKind};
pub use image::{Image, ImageCounts, ImageRef};
pub use reaction::{Reaction, ReactionCount, DEFAULT_REACTION, REACTION_PALETTE};
pub use user::User;
