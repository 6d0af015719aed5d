//! # photo-images
//!
//! The image-listing collaborator: a paginated source of image metadata,
//! an HTTP client for the Unsplash photo API, and a `Gallery` that
//! accumulates fetched pages for the list view and feed click-through.

pub mod gallery;
pub mod provider;
pub mod unsplash;

pub use gallery::Gallery;
pub use provider::ImageProvider;
pub use unsplash::UnsplashClient;
