use crate::app::patient_service::ServiceError;
use crate::transport::http::types::{error_response, ErrorResponse};
use axum::http::StatusCode;
use axum::Json;

/// Status code each service failure maps to.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) | ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn service_error_response(err: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = status_for(&err);
    match err {
        ServiceError::Validation(violations) => {
            tracing::warn!(%violations, "rejected invalid patient record");
            (
                status,
                Json(ErrorResponse {
                    detail: format!("Validation failed: {}", violations),
                    errors: Some(violations),
                }),
            )
        }
        ServiceError::Storage(e) => {
            tracing::error!(error = %e, "patient storage failure");
            error_response(status, "Internal storage error")
        }
        other => {
            tracing::warn!(status = status.as_u16(), "{}", other);
            error_response(status, other.to_string())
        }
    }
}
