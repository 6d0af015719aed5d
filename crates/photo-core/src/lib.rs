//! # photo-core
//!
//! Domain layer containing entities, value objects, and the ports (traits) the
//! reaction/comment engines are written against. This crate has no knowledge of
//! any concrete store, storage backend, or image provider.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, FeedItem, FeedKind, Image, ImageCounts, ImageRef, Reaction, ReactionCount, User,
    DEFAULT_REACTION, REACTION_PALETTE,
};
pub use error::DomainError;
pub use traits::{
    Clock, Collection, Filter, LiveQuery, LocalStorage, Op, Query, QueryData, Record, StoreResult,
    SyncStore, SystemClock,
};
pub use value_objects::{ColorParseError, ImageId, RecordId, UserColor};
