//! Domain definitions for patient records.
//!
//! A record is stored without its derived fields; `bmi` and `verdict` are recomputed every time a
//! full record is materialized into a [`PatientView`].

pub mod health;
pub mod record;
pub mod sort;

pub use health::{bmi, Verdict};
pub use record::{
    Collection, FieldViolation, Gender, PatientPatch, PatientRecord, PatientView, StoredPatient,
    ValidationErrors,
};
pub use sort::{SortField, SortOrder};
