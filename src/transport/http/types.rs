use crate::app::patient_service::PatientService;
use crate::domain::patient::ValidationErrors;
use crate::storage::PatientStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

pub type SharedService = Arc<PatientService<Arc<dyn PatientStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub service: SharedService,
}

impl AppState {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            service: Arc::new(PatientService::new(store)),
        }
    }
}

/// Body of the informational endpoints (`/`, `/about`).
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct InfoResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

/// Confirmation returned by successful writes.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
    /// Present on validation failures: one entry per violated field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// Field to sort on: `height` or `weight`.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub order: Option<String>,
}

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
            errors: None,
        }),
    )
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ErrorResponse>) {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Invalid JSON body: {} (expected: {})", err.body_text(), expected),
    )
}
