//! Image provider trait

use async_trait::async_trait;
use photo_common::AppResult;
use photo_core::Image;

/// Source of image metadata, newest first, in 1-based pages.
///
/// An empty page means there is nothing more to fetch.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Fetch one page of images
    async fn fetch(&self, page: u32) -> AppResult<Vec<Image>>;
}
