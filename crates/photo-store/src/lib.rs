//! # photo-store
//!
//! Implementations of the synchronized store and of local identity storage.
//!
//! ## Features
//!
//! - **Live store**: in-process `MemoryStore` that pushes a fresh snapshot to
//!   every subscriber after each applied batch
//! - **Degraded store**: `InertStore`, empty reads and no-op writes, used when
//!   no app id is configured
//! - **Registry**: one shared live store per app id, so every client bound to
//!   the same app sees the same data
//! - **Local storage**: JSON-file and in-memory key-value storage for the
//!   per-device identity
//!
//! ## Example
//!
//! ```ignore
//! use photo_store::StoreRegistry;
//!
//! let registry = StoreRegistry::new();
//! let store = registry.connect(&config.store);
//!
//! let live = store.subscribe(Query::for_image(&image_id));
//! store.transact(vec![Op::create(reaction)]).await?;
//! ```

pub mod error;
pub mod live;
pub mod local;

pub use error::{StorageResult, StoreError};
pub use live::{InertStore, MemoryStore, StoreRegistry};
pub use local::{FileStorage, MemoryStorage};
