//! Startup and the live-update loop

use std::sync::Arc;

use photo_common::{AppConfig, AppError, AppResult};
use photo_core::{FeedItem, LocalStorage, QueryData, SystemClock};
use photo_images::{Gallery, UnsplashClient};
use photo_service::{relative_time, CountIndex, FeedView, IdentityProvider, ServiceContextBuilder};
use photo_store::{FileStorage, MemoryStorage, StoreRegistry};
use tracing::{info, warn};

use crate::state::AppState;

/// Open the identity file, falling back to memory (identity then lasts one run)
fn open_identity_storage(config: &AppConfig) -> Arc<dyn LocalStorage> {
    match FileStorage::open(&config.identity.path) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            warn!(
                path = %config.identity.path.display(),
                error = %e,
                "Identity file unusable, identity will not persist"
            );
            Arc::new(MemoryStorage::new())
        }
    }
}

/// Resolve identity, connect the store, and load the first page of images
pub async fn create_app_state(config: AppConfig, registry: &StoreRegistry) -> AppResult<AppState> {
    let clock = Arc::new(SystemClock);

    let identity = IdentityProvider::new(open_identity_storage(&config), clock.clone());
    let user = identity.get_or_create_user();

    let store = registry.connect(&config.store);

    let ctx = ServiceContextBuilder::new()
        .store(store)
        .clock(clock)
        .toggle_strategy(config.store.toggle_strategy)
        .build()?;

    let gallery = match UnsplashClient::from_config(&config.images) {
        Ok(client) => {
            let mut gallery = Gallery::new(Arc::new(client));
            if let Err(e) = gallery.load_more().await {
                warn!(error = %e, "Failed to fetch images");
            }
            Some(gallery)
        }
        Err(e) => {
            warn!(error = %e, "Image provider disabled");
            None
        }
    };

    Ok(AppState::new(ctx, user, gallery, config))
}

/// Log the feed head and badge counts for one snapshot
fn report(state: &AppState, feed: &[FeedItem], snapshot: &QueryData) {
    let now = state.ctx.now_millis();
    match feed.first() {
        Some(latest) => info!(
            items = feed.len(),
            latest = %latest.id,
            user = %latest.user_name,
            image = %latest.display_description(),
            when = %relative_time(now, latest.created_at),
            "Feed updated"
        ),
        None => info!("Feed is empty"),
    }

    if let Some(gallery) = &state.gallery {
        let index = CountIndex::build(&snapshot.reactions, &snapshot.comments);
        for image in gallery.images() {
            let counts = index.get(&image.id);
            if counts.reaction_count + counts.comment_count > 0 {
                info!(
                    image_id = %image.id,
                    reactions = counts.reaction_count,
                    comments = counts.comment_count,
                    "Badge"
                );
            }
        }
    }
}

/// Follow the live feed until ctrl-c
pub async fn run(config: AppConfig) -> AppResult<()> {
    let registry = StoreRegistry::new();
    let state = create_app_state(config, &registry).await?;

    info!(
        user_id = %state.user.id,
        user_name = %state.user.name,
        color = %state.user.color,
        store_available = state.store_available(),
        images = state.gallery.as_ref().map_or(0, Gallery::len),
        "Session started"
    );

    let mut feed = FeedView::new(&state.ctx);
    report(&state, &feed.items(), &feed.snapshot());

    loop {
        let next = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            next = feed.changed() => next,
        };

        match next {
            Some(items) => report(&state, &items, &feed.snapshot()),
            None => {
                // inert store: nothing will ever arrive
                tokio::signal::ctrl_c().await.map_err(AppError::internal)?;
                break;
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
