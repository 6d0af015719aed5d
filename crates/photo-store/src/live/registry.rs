//! Store registry - composition-time selection of the store implementation.
//!
//! Uses DashMap so clients can connect from any task.

use std::sync::Arc;

use dashmap::DashMap;
use photo_common::StoreConfig;
use photo_core::SyncStore;

use super::{InertStore, MemoryStore};

/// Hands out one shared live store per app id
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: DashMap<String, Arc<MemoryStore>>,
}

impl StoreRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Get the live store for `app_id`, creating it on first use
    pub fn live(&self, app_id: &str) -> Arc<MemoryStore> {
        self.stores
            .entry(app_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(app_id = %app_id, "Created live store");
                MemoryStore::new_shared(app_id)
            })
            .clone()
    }

    /// Select the store for `config`: the shared live store when an app id is
    /// configured, the inert store otherwise
    pub fn connect(&self, config: &StoreConfig) -> Arc<dyn SyncStore> {
        match config.app_id.as_deref() {
            Some(app_id) => {
                tracing::info!(app_id = %app_id, "Connected to live store");
                self.live(app_id)
            }
            None => {
                tracing::warn!("Store not configured, reactions and comments are disabled");
                Arc::new(InertStore::new())
            }
        }
    }

    /// Number of live stores created so far
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
