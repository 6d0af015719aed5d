//! Accumulated image list for the gallery view

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use photo_common::AppResult;
use photo_core::{Image, ImageId};
use tracing::{info, warn};

use crate::provider::ImageProvider;

const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Pages of images fetched so far, in fetch order, without duplicates
pub struct Gallery {
    provider: Arc<dyn ImageProvider>,
    images: Vec<Image>,
    seen: HashSet<ImageId>,
    pages_loaded: u32,
    exhausted: bool,
    retries: u32,
    retry_delay: Duration,
}

impl Gallery {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self {
            provider,
            images: Vec::new(),
            seen: HashSet::new(),
            pages_loaded: 0,
            exhausted: false,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Retry transient fetch failures up to `retries` times, doubling
    /// `delay` after each attempt
    #[must_use]
    pub fn with_retry(mut self, retries: u32, delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = delay;
        self
    }

    /// The page `load_more` will fetch next
    pub fn next_page(&self) -> u32 {
        self.pages_loaded + 1
    }

    /// Whether the provider has returned an empty page
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Look up a loaded image by id
    pub fn find(&self, image_id: &ImageId) -> Option<&Image> {
        self.images.iter().find(|image| &image.id == image_id)
    }

    /// Fetch the next page and append its new images.
    ///
    /// Transient failures are retried with backoff. Returns the number of
    /// images added. On error nothing changes, so the same page is fetched
    /// by the next call.
    pub async fn load_more(&mut self) -> AppResult<usize> {
        if self.exhausted {
            return Ok(0);
        }

        let page = self.next_page();
        let fetched = self.fetch_with_retry(page).await?;
        self.pages_loaded = page;

        if fetched.is_empty() {
            self.exhausted = true;
            return Ok(0);
        }

        let before = self.images.len();
        for image in fetched {
            if self.seen.insert(image.id.clone()) {
                self.images.push(image);
            }
        }
        let added = self.images.len() - before;

        info!(page, added, total = self.images.len(), "Gallery page loaded");
        Ok(added)
    }

    async fn fetch_with_retry(&self, page: u32) -> AppResult<Vec<Image>> {
        let mut delay = self.retry_delay;
        let mut attempt = 0;
        loop {
            match self.provider.fetch(page).await {
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(page, attempt, error = %e, "Image fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                result => return result,
            }
        }
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("images", &self.images.len())
            .field("pages_loaded", &self.pages_loaded)
            .field("exhausted", &self.exhausted)
            .field("retries", &self.retries)
            .finish()
    }
}
