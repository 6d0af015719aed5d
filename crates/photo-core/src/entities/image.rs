//! Image metadata as delivered by the image provider, and the denormalized
//! copy stored on every reaction and comment.

use serde::{Deserialize, Serialize};

use crate::value_objects::ImageId;

/// An image from the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub url: String,
    pub thumb_url: String,
    pub description: String,
}

impl Image {
    /// Create a new Image
    pub fn new(
        id: impl Into<ImageId>,
        url: impl Into<String>,
        thumb_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            thumb_url: thumb_url.into(),
            description: description.into(),
        }
    }

    /// Snapshot of the display fields to store alongside a reaction or comment.
    ///
    /// An empty thumbnail falls back to the full-size url.
    pub fn to_ref(&self) -> ImageRef {
        let thumb_url = if self.thumb_url.is_empty() {
            self.url.clone()
        } else {
            self.thumb_url.clone()
        };

        ImageRef {
            image_url: self.url.clone(),
            thumb_url,
            image_description: self.description.clone(),
        }
    }
}

/// Image fields copied onto a record at write time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub thumb_url: String,
    #[serde(default)]
    pub image_description: String,
}

/// Badge counts shown on a gallery tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCounts {
    pub reaction_count: usize,
    pub comment_count: usize,
}
