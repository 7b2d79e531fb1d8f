use super::health::{bmi, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 119;

/// The persisted collection: patient id -> stored (non-key) fields.
pub type Collection = BTreeMap<String, StoredPatient>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Gender {
    Male,
    Female,
    #[serde(alias = "Others")]
    Other,
}

/// A patient as it is persisted: every field except the key, no derived values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StoredPatient {
    pub name: String,
    pub city: String,
    /// Age in years (1-119).
    pub age: u32,
    pub gender: Gender,
    /// Height in meters. Absent in a hand-edited document reads as 0 and fails validation on
    /// the next write.
    #[serde(default)]
    pub height: f64,
    /// Weight in kilograms, same rule as `height`.
    #[serde(default)]
    pub weight: f64,
}

/// A full patient record as submitted on create.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PatientRecord {
    #[schema(example = "P001")]
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

/// Fields a caller intends to change. Absent (or `null`) fields are left untouched.
///
/// There is no `id` here: a patient id never changes after creation.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct PatientPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// A materialized record: stored fields plus `bmi` and `verdict`.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PatientView {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every constraint a record violated.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl StoredPatient {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.collect_violations(&mut errors);
        errors.into_result()
    }

    fn collect_violations(&self, errors: &mut ValidationErrors) {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            errors.push(
                "age",
                format!("must be between {} and {} (got {})", MIN_AGE, MAX_AGE, self.age),
            );
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            errors.push("height", format!("must be greater than 0 (got {})", self.height));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            errors.push("weight", format!("must be greater than 0 (got {})", self.weight));
        }
    }

    pub fn bmi(&self) -> f64 {
        bmi(self.weight, self.height)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::classify(self.bmi())
    }

    /// Attaches the key and the derived fields.
    pub fn materialize(&self, id: &str) -> PatientView {
        let bmi = self.bmi();
        PatientView {
            id: id.to_string(),
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi,
            verdict: Verdict::classify(bmi),
        }
    }
}

impl PatientRecord {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.id.trim().is_empty() {
            errors.push("id", "must not be empty");
        }
        self.stored().collect_violations(&mut errors);
        errors.into_result()
    }

    fn stored(&self) -> StoredPatient {
        StoredPatient {
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        }
    }

    /// Splits the record into its key and its persisted form.
    pub fn into_parts(self) -> (String, StoredPatient) {
        let stored = self.stored();
        (self.id, stored)
    }
}

impl PatientPatch {
    pub fn is_empty(&self) -> bool {
        *self == PatientPatch::default()
    }

    /// Returns `base` with every supplied field replaced. `base` itself is not touched, so a
    /// merged record that fails validation can simply be dropped.
    pub fn apply_to(&self, base: &StoredPatient) -> StoredPatient {
        let mut merged = base.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(city) = &self.city {
            merged.city = city.clone();
        }
        if let Some(age) = self.age {
            merged.age = age;
        }
        if let Some(gender) = self.gender {
            merged.gender = gender;
        }
        if let Some(height) = self.height {
            merged.height = height;
        }
        if let Some(weight) = self.weight {
            merged.weight = weight;
        }
        merged
    }
}
