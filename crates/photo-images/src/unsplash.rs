//! Unsplash photo API client

use std::time::Duration;

use async_trait::async_trait;
use photo_common::{AppError, AppResult, ImagesConfig};
use photo_core::Image;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::provider::ImageProvider;

const UNTITLED: &str = "Untitled";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for `GET /photos`
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: Client,
    api_url: String,
    access_key: String,
    per_page: u32,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
    #[serde(default)]
    thumb: String,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    urls: PhotoUrls,
    description: Option<String>,
    alt_description: Option<String>,
}

impl Photo {
    fn into_image(self) -> Image {
        let description = [self.description, self.alt_description]
            .into_iter()
            .flatten()
            .find(|d| !d.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        Image::new(self.id, self.urls.regular, self.urls.thumb, description)
    }
}

impl UnsplashClient {
    /// Create a client from the images configuration.
    ///
    /// # Errors
    /// `AppError::Config` if no access key is configured.
    pub fn from_config(config: &ImagesConfig) -> AppResult<Self> {
        let access_key = config
            .access_key
            .clone()
            .ok_or_else(|| AppError::Config("UNSPLASH_ACCESS_KEY is not set".to_string()))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AppError::internal)?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            access_key,
            per_page: config.per_page,
        })
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    fn photos_url(&self) -> String {
        format!("{}/photos", self.api_url)
    }
}

#[async_trait]
impl ImageProvider for UnsplashClient {
    #[instrument(skip(self))]
    async fn fetch(&self, page: u32) -> AppResult<Vec<Image>> {
        if page == 0 {
            return Err(AppError::InvalidInput("pages start at 1".to_string()));
        }

        let response = self
            .client
            .get(self.photos_url())
            .query(&[
                ("page", page.to_string()),
                ("per_page", self.per_page.to_string()),
                ("order_by", "latest".to_string()),
                ("client_id", self.access_key.clone()),
            ])
            .send()
            .await
            .map_err(AppError::external)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::external(format!(
                "failed to fetch images: status {status}: {text}"
            )));
        }

        let photos: Vec<Photo> = response
            .json()
            .await
            .map_err(|e| AppError::external(format!("invalid response: {e}")))?;

        debug!(page, count = photos.len(), "Fetched images");

        Ok(photos.into_iter().map(Photo::into_image).collect())
    }
}
