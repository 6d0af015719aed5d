//! Test harness wiring the engines to a store

use std::sync::Arc;

use photo_common::ToggleStrategy;
use photo_core::{Image, ImageId, Query, QueryData};
use photo_service::{CommentService, ImageThread, ReactionService, ServiceContext};
use photo_store::{InertStore, MemoryStore};

use crate::fixtures::ManualClock;

/// Engines bound to a live in-process store and a manual clock
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub ctx: ServiceContext,
}

impl TestApp {
    /// Live store, snapshot toggles, clock at zero
    pub fn live() -> Self {
        Self::with_strategy(ToggleStrategy::Snapshot)
    }

    pub fn with_strategy(strategy: ToggleStrategy) -> Self {
        let store = MemoryStore::new_shared("integration");
        let clock = Arc::new(ManualClock::default());
        let ctx = ServiceContext::builder()
            .store(store.clone())
            .clock(clock.clone())
            .toggle_strategy(strategy)
            .build()
            .unwrap_or_else(|e| panic!("test context: {e}"));
        Self { store, clock, ctx }
    }

    /// Another client bound to the same store and clock
    pub fn second_client(&self) -> ServiceContext {
        ServiceContext::builder()
            .store(self.store.clone())
            .clock(self.clock.clone())
            .toggle_strategy(self.ctx.toggle_strategy())
            .build()
            .unwrap_or_else(|e| panic!("test context: {e}"))
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(&self.ctx)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.ctx)
    }

    pub fn thread(&self, image: Image) -> ImageThread<'_> {
        ImageThread::open(&self.ctx, image)
    }

    /// Current records for one image
    pub fn image_snapshot(&self, image_id: &ImageId) -> QueryData {
        self.ctx.subscribe(Query::for_image(image_id)).current()
    }

    pub fn set_time(&self, millis: i64) {
        self.clock.set(millis);
    }
}

/// Engines bound to the inert store
pub fn inert_context() -> ServiceContext {
    ServiceContext::builder()
        .store(Arc::new(InertStore::new()))
        .build()
        .unwrap_or_else(|e| panic!("test context: {e}"))
}
