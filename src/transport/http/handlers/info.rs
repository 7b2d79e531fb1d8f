use crate::transport::http::types::InfoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = InfoResponse))
)]
pub async fn hello_handler() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Patient Management System API".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "What this service does", body = InfoResponse))
)]
pub async fn about_handler() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "A fully functional API to manage your patient records".to_string(),
    })
}
