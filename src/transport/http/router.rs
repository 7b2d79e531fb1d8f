use crate::domain::patient::{
    FieldViolation, Gender, PatientPatch, PatientRecord, PatientView, StoredPatient, Verdict,
};
use crate::transport::http::handlers::{info, patients};
use crate::transport::http::types::{ErrorResponse, InfoResponse, MessageResponse};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        info::hello_handler,
        info::about_handler,
        patients::view_handler,
        patients::view_patient_handler,
        patients::sort_handler,
        patients::create_handler,
        patients::edit_handler,
        patients::delete_handler
    ),
    components(schemas(
        InfoResponse,
        MessageResponse,
        ErrorResponse,
        FieldViolation,
        Gender,
        Verdict,
        PatientRecord,
        PatientPatch,
        PatientView,
        StoredPatient
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/", get(info::hello_handler))
        .route("/about", get(info::about_handler))
        .route("/view", get(patients::view_handler))
        .route("/patient/:patient_id", get(patients::view_patient_handler))
        .route("/sort", get(patients::sort_handler))
        .route("/create", post(patients::create_handler))
        .route("/edit/:patient_id", put(patients::edit_handler))
        .route("/delete/:patient_id", delete(patients::delete_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
