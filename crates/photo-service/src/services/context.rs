//! Service context - dependency container for the engines
//!
//! Holds the selected store (live or inert), the clock used to stamp
//! records, and the reaction toggle strategy.

use std::sync::Arc;

use photo_common::ToggleStrategy;
use photo_core::{Clock, LiveQuery, Query, SyncStore, SystemClock};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn SyncStore>,
    clock: Arc<dyn Clock>,
    toggle_strategy: ToggleStrategy,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        store: Arc<dyn SyncStore>,
        clock: Arc<dyn Clock>,
        toggle_strategy: ToggleStrategy,
    ) -> Self {
        Self {
            store,
            clock,
            toggle_strategy,
        }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the synchronized store
    pub fn store(&self) -> &dyn SyncStore {
        self.store.as_ref()
    }

    /// Shared handle to the store
    pub fn store_handle(&self) -> Arc<dyn SyncStore> {
        Arc::clone(&self.store)
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current time in epoch milliseconds
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn toggle_strategy(&self) -> ToggleStrategy {
        self.toggle_strategy
    }

    /// Subscribe to `query` on the store
    pub fn subscribe(&self, query: Query) -> LiveQuery {
        self.store.subscribe(query)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store_available", &self.store.is_available())
            .field("toggle_strategy", &self.toggle_strategy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn SyncStore>>,
    clock: Option<Arc<dyn Clock>>,
    toggle_strategy: ToggleStrategy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn SyncStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn toggle_strategy(mut self, strategy: ToggleStrategy) -> Self {
        self.toggle_strategy = strategy;
        self
    }

    /// Build the ServiceContext
    ///
    /// The clock defaults to the system clock.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if no store was given
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.toggle_strategy,
        ))
    }
}
