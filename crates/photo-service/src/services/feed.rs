//! Feed aggregator
//!
//! Merges every reaction and comment into one newest-first activity stream.
//! The feed is recomputed in full from each snapshot.

use chrono::DateTime;
use photo_core::{Comment, FeedItem, LiveQuery, Query, QueryData, Reaction};

use super::context::ServiceContext;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// All reactions and comments as feed items, newest first.
///
/// Items with equal timestamps keep input order (reactions before comments).
pub fn aggregate_feed(reactions: &[Reaction], comments: &[Comment]) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = reactions
        .iter()
        .map(FeedItem::from)
        .chain(comments.iter().map(FeedItem::from))
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

/// Short label for how long ago `created_at_ms` was
pub fn relative_time(now_ms: i64, created_at_ms: i64) -> String {
    let elapsed = now_ms.saturating_sub(created_at_ms);

    if elapsed < MINUTE_MS {
        "just now".to_string()
    } else if elapsed < HOUR_MS {
        format!("{}m ago", elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        format!("{}h ago", elapsed / HOUR_MS)
    } else {
        DateTime::from_timestamp_millis(created_at_ms)
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Live feed over the full reaction and comment collections
#[derive(Debug)]
pub struct FeedView {
    live: LiveQuery,
}

impl FeedView {
    /// Subscribe to everything in the store
    pub fn new(ctx: &ServiceContext) -> Self {
        Self {
            live: ctx.subscribe(Query::everything()),
        }
    }

    /// Latest full snapshot
    pub fn snapshot(&self) -> QueryData {
        self.live.current()
    }

    /// Feed for the latest snapshot
    pub fn items(&self) -> Vec<FeedItem> {
        let data = self.live.current();
        aggregate_feed(&data.reactions, &data.comments)
    }

    /// Wait for the next snapshot and return its feed.
    ///
    /// `None` when the store will never push again (including the inert store).
    pub async fn changed(&mut self) -> Option<Vec<FeedItem>> {
        let data = self.live.changed().await?;
        Some(aggregate_feed(&data.reactions, &data.comments))
    }
}
