use super::{PatientStore, StorageError};
use crate::domain::patient::Collection;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-process backend. Keeps a serialized copy of the collection and counts calls, which makes
/// it handy for tests and for running the API without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Vec<u8>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Raw persisted bytes, for byte-level comparisons.
    pub fn snapshot(&self) -> Vec<u8> {
        self.lock_document().clone()
    }

    fn lock_document(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        // A poisoned lock only means a panicking test thread held it; the bytes are still whole.
        self.document.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn load(&self) -> Result<Collection, StorageError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let doc = self.lock_document();
        if doc.is_empty() {
            return Ok(Collection::new());
        }
        serde_json::from_slice(&doc).map_err(|source| StorageError::Json {
            path: "<memory>".to_string(),
            source,
        })
    }

    async fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let bytes = serde_json::to_vec(collection).map_err(|source| StorageError::Json {
            path: "<memory>".to_string(),
            source,
        })?;
        *self.lock_document() = bytes;
        Ok(())
    }
}
