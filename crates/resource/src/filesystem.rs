//! Filesystem-based storage backend for native platforms.
//!
//! Each key is stored as one file under the base directory. Keys are
//! restricted to a safe character set so they can never name a path outside
//! the base directory.
//!
//! # Layout
//!
//! The key `site-12:photos` is stored as `<base>/site-12.photos.json`.
//! Writes go to a sibling temporary file first and are renamed into place,
//! so a failed write never leaves a truncated blob behind.

use folio_traits::{StorageBackend, StorageError};
use std::path::{Path, PathBuf};

/// A storage backend that keeps one file per key on the local filesystem.
#[derive(Debug)]
pub struct FileStorage {
    base_path: PathBuf,
    /// Maximum size of a single blob in bytes.
    max_blob_bytes: Option<usize>,
}

impl FileStorage {
    /// Creates a backend rooted at `base_path`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base)?;
        Ok(Self {
            base_path: base,
            max_blob_bytes: None,
        })
    }

    /// Rejects writes larger than `limit` bytes with `QuotaExceeded`.
    pub fn with_max_blob_bytes(mut self, limit: usize) -> Self {
        self.max_blob_bytes = Some(limit);
        self
    }

    /// Returns the base path for this backend.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Maps a key to its file, rejecting anything outside `[A-Za-z0-9_-:]`.
    fn file_for_key(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self
            .base_path
            .join(format!("{}.json", key.replace(':', "."))))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.file_for_key(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.file_for_key(key)?;
        if let Some(limit) = self.max_blob_bytes
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size: value.len(),
                limit,
            });
        }

        let tmp = path.with_extension("json.tmp");
        let result = std::fs::write(&tmp, value).and_then(|_| std::fs::rename(&tmp, &path));
        if let Err(e) = result {
            let _ = std::fs::remove_file(&tmp);
            log::warn!("Write of '{}' to {} failed: {}", key, path.display(), e);
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            });
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.file_for_key(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "FileStorage"
    }
}
