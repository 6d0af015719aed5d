//! Synchronized store port
//!
//! A live, query-subscribable store holding two collections, `reactions` and
//! `comments`. Subscriptions deliver the current matching records and then a
//! fresh snapshot whenever the underlying data changes; mutations are
//! submitted as one batch that succeeds or fails as a whole.
//!
//! An unconfigured store is still a `SyncStore`: it answers every query with
//! an empty snapshot and accepts every batch without doing anything, so call
//! sites never branch on "is there a store".

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::entities::{Comment, Reaction};
use crate::error::DomainError;
use crate::value_objects::{ImageId, RecordId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// The collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Reactions,
    Comments,
}

impl Collection {
    /// Collection name as used on the wire
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reactions => "reactions",
            Self::Comments => "comments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Equality filter on `imageId`; an empty filter (`{}`) matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_id: Option<ImageId>,
}

impl Filter {
    /// Match every record in the collection
    #[must_use]
    pub fn all() -> Self {
        Self { image_id: None }
    }

    /// Match records attached to one image
    #[must_use]
    pub fn image(image_id: ImageId) -> Self {
        Self {
            image_id: Some(image_id),
        }
    }

    #[inline]
    pub fn matches(&self, image_id: &ImageId) -> bool {
        self.image_id.as_ref().map_or(true, |wanted| wanted == image_id)
    }
}

/// A query names the collections it wants, each with its own filter.
///
/// Serializes as `{"reactions": {"imageId": "..."}, "comments": {}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reactions: Option<Filter>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comments: Option<Filter>,
}

impl Query {
    /// An empty query (matches nothing)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Both collections, unscoped
    #[must_use]
    pub fn everything() -> Self {
        Self::new().reactions(Filter::all()).comments(Filter::all())
    }

    /// Both collections, scoped to one image
    #[must_use]
    pub fn for_image(image_id: &ImageId) -> Self {
        Self::new()
            .reactions(Filter::image(image_id.clone()))
            .comments(Filter::image(image_id.clone()))
    }

    /// Add the reactions collection
    #[must_use]
    pub fn reactions(mut self, filter: Filter) -> Self {
        self.reactions = Some(filter);
        self
    }

    /// Add the comments collection
    #[must_use]
    pub fn comments(mut self, filter: Filter) -> Self {
        self.comments = Some(filter);
        self
    }

    /// Project the full store contents down to what this query asks for
    pub fn apply(&self, data: &QueryData) -> QueryData {
        let reactions = match &self.reactions {
            Some(filter) => data
                .reactions
                .iter()
                .filter(|r| filter.matches(&r.image_id))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        let comments = match &self.comments {
            Some(filter) => data
                .comments
                .iter()
                .filter(|c| filter.matches(&c.image_id))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        QueryData {
            reactions,
            comments,
        }
    }
}

/// Records returned for a query, keyed by collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryData {
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl QueryData {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty() && self.comments.is_empty()
    }
}

// ============================================================================
// Mutations
// ============================================================================

/// A record of either collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Reaction(Reaction),
    Comment(Comment),
}

impl Record {
    #[must_use]
    pub fn collection(&self) -> Collection {
        match self {
            Self::Reaction(_) => Collection::Reactions,
            Self::Comment(_) => Collection::Comments,
        }
    }

    #[must_use]
    pub fn id(&self) -> &RecordId {
        match self {
            Self::Reaction(r) => &r.id,
            Self::Comment(c) => &c.id,
        }
    }
}

impl From<Reaction> for Record {
    fn from(reaction: Reaction) -> Self {
        Self::Reaction(reaction)
    }
}

impl From<Comment> for Record {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}

/// One operation of a mutation batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Create `record` under its own id in its own collection
    Create(Record),
    /// Delete the record `id` from `collection`; deleting a missing id is not an error
    Delete { collection: Collection, id: RecordId },
}

impl Op {
    pub fn create(record: impl Into<Record>) -> Self {
        Self::Create(record.into())
    }

    pub fn delete(collection: Collection, id: RecordId) -> Self {
        Self::Delete { collection, id }
    }

    #[must_use]
    pub fn collection(&self) -> Collection {
        match self {
            Self::Create(record) => record.collection(),
            Self::Delete { collection, .. } => *collection,
        }
    }

    #[must_use]
    pub fn record_id(&self) -> &RecordId {
        match self {
            Self::Create(record) => record.id(),
            Self::Delete { id, .. } => id,
        }
    }
}

// ============================================================================
// Live queries
// ============================================================================

/// Handle to a live subscription.
///
/// Holds the query and a receiver of full-store snapshots; every read projects
/// the latest snapshot through the query, so nothing is cached across updates.
#[derive(Debug, Clone)]
pub struct LiveQuery {
    query: Query,
    rx: watch::Receiver<Arc<QueryData>>,
}

impl LiveQuery {
    /// Bind `query` to a snapshot receiver
    pub fn new(query: Query, rx: watch::Receiver<Arc<QueryData>>) -> Self {
        Self { query, rx }
    }

    /// A subscription that stays empty forever
    pub fn empty(query: Query) -> Self {
        let (_tx, rx) = watch::channel(Arc::new(QueryData::default()));
        Self { query, rx }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The records matching the query in the latest snapshot
    pub fn current(&self) -> QueryData {
        self.query.apply(&self.rx.borrow())
    }

    /// Wait for the next pushed snapshot.
    ///
    /// Returns `None` once the store has gone away (never for a live store,
    /// immediately for an empty subscription).
    pub async fn changed(&mut self) -> Option<QueryData> {
        self.rx.changed().await.ok()?;
        let snapshot = Arc::clone(&self.rx.borrow_and_update());
        Some(self.query.apply(&snapshot))
    }

    /// Whether a store is still feeding this subscription
    pub fn is_live(&self) -> bool {
        self.rx.has_changed().is_ok()
    }

    /// Stream the current snapshot, then every subsequent one
    pub fn into_stream(self) -> impl Stream<Item = QueryData> + Send {
        futures::stream::unfold((self, true), |(mut live, first)| async move {
            if first {
                let data = live.current();
                return Some((data, (live, false)));
            }
            let data = live.changed().await?;
            Some((data, (live, false)))
        })
    }
}

/// The synchronized store capability
#[async_trait]
pub trait SyncStore: Send + Sync {
    /// Subscribe to `query`
    fn subscribe(&self, query: Query) -> LiveQuery;

    /// Apply a batch of operations as one outcome
    async fn transact(&self, ops: Vec<Op>) -> StoreResult<()>;

    /// Whether this store is backed by real data.
    ///
    /// Only for presentation (the "not configured" notice); engines never ask.
    fn is_available(&self) -> bool;
}
