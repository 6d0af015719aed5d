//! Ports - the interfaces the engines are written against
//!
//! The domain layer defines what it needs; `photo-store` provides the
//! implementations, selected once at composition time.

mod clock;
mod storage;
mod store;

pub use clock::{Clock, SystemClock};
pub use storage::LocalStorage;
pub use store::{
    Collection, Filter, LiveQuery, Op, Query, QueryData, Record, StoreResult, SyncStore,
};
