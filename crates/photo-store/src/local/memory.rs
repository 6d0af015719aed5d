//! In-memory key-value storage (tests, and fallback when no file is usable)

use dashmap::DashMap;
use photo_core::{DomainError, LocalStorage};

/// Non-durable storage; values live as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: DashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with `pairs`
    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        for (key, value) in pairs {
            storage.values.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
