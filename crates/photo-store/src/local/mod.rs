//! Durable per-device key-value storage for the local identity.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
