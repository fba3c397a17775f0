//! StorageBackend trait for abstracting durable key/value persistence.
//!
//! Collections (e.g. the photo library) are stored as one serialized blob per
//! key and are always read and written as a whole.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage quota exceeded writing '{key}': {size} bytes exceeds limit of {limit}")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// A string-keyed blob store.
///
/// This abstraction allows the core to persist collections to:
/// - In-memory storage (tests, ephemeral sessions)
/// - Local filesystem (`folio-resource`)
/// - Any browser-side store reachable through a host binding
///
/// # Example
///
/// ```ignore
/// let storage = InMemoryStorage::with_quota(5 * 1024 * 1024);
/// storage.write("site-a:photos", "[]")?;
/// assert_eq!(storage.read("site-a:photos")?.as_deref(), Some("[]"));
/// ```
pub trait StorageBackend: Send + Sync + Debug {
    /// Read the blob stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    ///
    /// Implementations with a size limit must reject oversized writes with
    /// `StorageError::QuotaExceeded` and leave the previous value intact.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the blob stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Returns a human-readable name for this backend (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory storage backend with an optional total-size quota.
///
/// The quota mirrors the few-megabyte ceiling of browser local storage.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes pushing the total size past `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Total bytes currently stored (keys and values).
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .map(|e| e.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }

    /// Get the number of entries in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    ///
    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.entries.read().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl StorageBackend for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::WriteFailed {
                key: key.to_string(),
                message: "storage lock poisoned".to_string(),
            })?;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let size = others + key.len() + value.len();
            if size > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryStorage"
    }
}
