//! Persistence backends for the patient collection.
//!
//! The whole collection is the unit of persistence: callers load it, change it, and save it back
//! in one piece. Backends keep no cache between calls.

use crate::domain::patient::Collection;
use async_trait::async_trait;
use std::sync::Arc;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed collection in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Contract the service depends on.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Reads the complete collection.
    async fn load(&self) -> Result<Collection, StorageError>;

    /// Replaces the complete collection.
    async fn save(&self, collection: &Collection) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: PatientStore + ?Sized> PatientStore for Arc<T> {
    async fn load(&self) -> Result<Collection, StorageError> {
        (**self).load().await
    }

    async fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        (**self).save(collection).await
    }
}
