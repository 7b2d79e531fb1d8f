use crate::app::patient_service::ServiceError;
use crate::domain::patient::{PatientPatch, PatientRecord, PatientView, StoredPatient};
use crate::transport::http::handlers::common::service_error_response;
use crate::transport::http::types::{
    json_422, AppState, ErrorResponse, MessageResponse, SortQuery,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::collections::BTreeMap;

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Stored collection keyed by patient id", body = BTreeMap<String, StoredPatient>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn view_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list_all().await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient in the database", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient with derived bmi and verdict", body = PatientView),
        (status = 404, description = "Patient not found", body = ErrorResponse)
    )
)]
pub async fn view_patient_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> impl IntoResponse {
    match state.service.get_by_id(&patient_id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortQuery),
    responses(
        (status = 200, description = "Patients ordered by the requested field", body = [PatientView]),
        (status = 400, description = "Invalid sort field or order", body = ErrorResponse)
    )
)]
pub async fn sort_handler(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> impl IntoResponse {
    let Some(sort_by) = query.sort_by.as_deref() else {
        return service_error_response(ServiceError::InvalidArgument(
            "Missing query parameter 'sort_by' (height or weight)".to_string(),
        ))
        .into_response();
    };

    match state
        .service
        .list_sorted(sort_by, query.order.as_deref())
        .await
    {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = PatientRecord,
    responses(
        (status = 201, description = "Patient created", body = MessageResponse),
        (status = 400, description = "Patient already exists", body = ErrorResponse),
        (status = 422, description = "Record violates the schema", body = ErrorResponse)
    )
)]
pub async fn create_handler(
    State(state): State<AppState>,
    request: Result<Json<PatientRecord>, JsonRejection>,
) -> impl IntoResponse {
    let Json(record) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "a full patient record").into_response(),
    };

    match state.service.create(record).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Patient created successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/edit/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient to update")
    ),
    request_body = PatientPatch,
    responses(
        (status = 200, description = "Patient updated", body = MessageResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 422, description = "Merged record violates the schema", body = ErrorResponse)
    )
)]
pub async fn edit_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    request: Result<Json<PatientPatch>, JsonRejection>,
) -> impl IntoResponse {
    let Json(patch) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "an object with the fields to change").into_response(),
    };

    match state.service.update(&patient_id, patch).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Patient updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/delete/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient to delete")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = MessageResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> impl IntoResponse {
    match state.service.delete(&patient_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Patient deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
