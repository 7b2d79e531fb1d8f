//! The Patient Store Service.
//!
//! Every operation loads the full collection from the backend, applies one query or mutation,
//! and (for writes) saves the full collection back. Nothing is cached between calls.
//! Writers within one process are serialized through `write_gate` so two concurrent updates
//! cannot overwrite each other's changes.

use crate::domain::patient::{
    Collection, PatientPatch, PatientRecord, PatientView, SortField, SortOrder, ValidationErrors,
};
use crate::storage::{PatientStore, StorageError};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Patient '{0}' not found")]
    NotFound(String),
    #[error("Patient '{0}' already exists")]
    Conflict(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

pub struct PatientService<S> {
    store: S,
    write_gate: Mutex<()>,
}

impl<S: PatientStore> PatientService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored collection, verbatim.
    pub async fn list_all(&self) -> Result<Collection, ServiceError> {
        Ok(self.store.load().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<PatientView, ServiceError> {
        let data = self.store.load().await?;
        data.get(id)
            .map(|p| p.materialize(id))
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Materialized records ordered by `field`. Ties keep id order.
    pub async fn list_sorted(
        &self,
        field: &str,
        order: Option<&str>,
    ) -> Result<Vec<PatientView>, ServiceError> {
        let field: SortField = field.parse().map_err(ServiceError::InvalidArgument)?;
        let order: SortOrder = match order {
            Some(o) => o.parse().map_err(ServiceError::InvalidArgument)?,
            None => SortOrder::default(),
        };

        let data = self.store.load().await?;
        let mut entries: Vec<_> = data.iter().collect();
        entries.sort_by(|(_, a), (_, b)| order.compare(field.key(a), field.key(b)));
        Ok(entries
            .into_iter()
            .map(|(id, p)| p.materialize(id))
            .collect())
    }

    pub async fn create(&self, record: PatientRecord) -> Result<(), ServiceError> {
        record.validate()?;
        let (id, patient) = record.into_parts();

        let _guard = self.write_gate.lock().await;
        let mut data = self.store.load().await?;
        if data.contains_key(&id) {
            return Err(ServiceError::Conflict(id));
        }
        data.insert(id.clone(), patient);
        self.store.save(&data).await?;
        tracing::info!(patient_id = %id, "patient created");
        Ok(())
    }

    /// Merges `patch` over the stored record and re-validates the merged result. On any failure
    /// nothing is saved.
    pub async fn update(&self, id: &str, patch: PatientPatch) -> Result<(), ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut data = self.store.load().await?;
        let current = data
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let merged = patch.apply_to(current);
        merged.validate()?;

        data.insert(id.to_string(), merged);
        self.store.save(&data).await?;
        tracing::info!(patient_id = %id, "patient updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut data = self.store.load().await?;
        if data.remove(id).is_none() {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        self.store.save(&data).await?;
        tracing::info!(patient_id = %id, "patient deleted");
        Ok(())
    }
}
