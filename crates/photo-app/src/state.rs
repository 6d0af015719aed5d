//! Application state

use photo_common::AppConfig;
use photo_core::User;
use photo_images::Gallery;
use photo_service::ServiceContext;

/// Everything the running app holds for the session
#[derive(Debug)]
pub struct AppState {
    /// Engines' dependencies (store, clock, toggle strategy)
    pub ctx: ServiceContext,
    /// Identity of this device, resolved once at startup
    pub user: User,
    /// Loaded images; `None` without an image provider key
    pub gallery: Option<Gallery>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(ctx: ServiceContext, user: User, gallery: Option<Gallery>, config: AppConfig) -> Self {
        Self {
            ctx,
            user,
            gallery,
            config,
        }
    }

    /// Whether a live store backs this session
    pub fn store_available(&self) -> bool {
        self.ctx.store().is_available()
    }
}
