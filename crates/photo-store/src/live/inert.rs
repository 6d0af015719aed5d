//! Degraded-mode store used when no live store is configured.

use async_trait::async_trait;
use photo_core::{LiveQuery, Op, Query, StoreResult, SyncStore};

/// Store that holds nothing and accepts everything.
///
/// Every subscription is empty and never updates; every batch resolves
/// successfully without effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertStore;

impl InertStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SyncStore for InertStore {
    fn subscribe(&self, query: Query) -> LiveQuery {
        LiveQuery::empty(query)
    }

    async fn transact(&self, ops: Vec<Op>) -> StoreResult<()> {
        tracing::trace!(ops = ops.len(), "Store not configured, dropping batch");
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}
