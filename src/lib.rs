pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::patient_service::{PatientService, ServiceError};
pub use domain::patient::{Gender, PatientPatch, PatientRecord, PatientView, StoredPatient, Verdict};
pub use infra::predictor;
pub use storage::{JsonFileStore, MemoryStore, PatientStore, StorageError};
