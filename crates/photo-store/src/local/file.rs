//! JSON-file key-value storage.
//!
//! The whole map is kept in memory and rewritten on every `set`; the file is
//! written to a sibling temp path and renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use photo_core::{DomainError, LocalStorage};

use crate::error::{StorageResult, StoreError};

/// Durable storage backed by a JSON object file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`.
    ///
    /// A missing file is an empty store, and so is a malformed one: it is moved
    /// aside to `<path>.corrupt` so the next `set` writes a valid file.
    /// An unreadable file is an error.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(source) => {
                    let err = StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    };
                    Self::quarantine(&path, &err);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "Opened local storage");

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn quarantine(path: &Path, err: &StoreError) {
        let aside = path.with_extension("corrupt");
        match fs::rename(path, &aside) {
            Ok(()) => tracing::warn!(
                error = %err,
                moved_to = %aside.display(),
                "Discarding malformed local storage"
            ),
            Err(e) => tracing::warn!(
                error = %err,
                rename_error = %e,
                "Discarding malformed local storage, could not move it aside"
            ),
        }
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> StorageResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut values = self.values.write();
        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&values) {
            // keep memory and disk in step
            match previous {
                Some(old) => values.insert(key.to_string(), old),
                None => values.remove(key),
            };
            return Err(e.into());
        }
        Ok(())
    }
}
