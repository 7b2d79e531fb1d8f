//! Collection stored as a single JSON document on disk.

use super::{PatientStore, StorageError};
use crate::domain::patient::Collection;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed store. `save` writes a uniquely named sibling temp file and renames it over the
/// target, so readers see either the old or the new document, never a partial one.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.display_path(),
            source,
        }
    }

    /// Directory the temp file is created in; must share a filesystem with `path`.
    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[async_trait]
impl PatientStore for JsonFileStore {
    async fn load(&self) -> Result<Collection, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.display_path(), "collection file missing, starting empty");
                return Ok(Collection::new());
            }
            Err(e) => return Err(self.io_err(e)),
        };
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Collection::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
            path: self.display_path(),
            source,
        })
    }

    async fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(collection).map_err(|source| StorageError::Json {
            path: self.display_path(),
            source,
        })?;
        let dir = self.parent_dir();
        let target = self.path.clone();
        // A dropped NamedTempFile removes itself, so failed saves leave nothing behind.
        let written = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&body)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| self.io_err(std::io::Error::other(e)))?;
        written.map_err(|e| self.io_err(e))
    }
}
