//! Durable per-device key-value storage

use crate::error::DomainError;

/// String key-value storage that survives restarts (the identity lives here)
pub trait LocalStorage: Send + Sync {
    /// Read a key; `Ok(None)` when it was never written
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a key, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
