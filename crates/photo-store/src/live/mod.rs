//! Synchronized store implementations.

mod inert;
mod memory;
mod registry;

pub use inert::InertStore;
pub use memory::MemoryStore;
pub use registry::StoreRegistry;
