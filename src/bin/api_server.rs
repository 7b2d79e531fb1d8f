// src/bin/api_server.rs

use patient_records::infra::config;
use patient_records::transport;
use patient_records::{JsonFileStore, PatientStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    config::init_tracing();

    // --- Persistence Backend ---
    let patients_file = config::patients_file();
    let store = JsonFileStore::new(&patients_file);
    // Fail fast on a corrupt collection rather than on the first request.
    let existing = store.load().await?;
    tracing::info!(
        path = %patients_file,
        patients = existing.len(),
        "> Patient collection ready"
    );

    let store: Arc<dyn PatientStore> = Arc::new(store);
    let app_state = transport::http::AppState::new(store);

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = config::bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("> API server listening on http://{}", addr);
    tracing::info!("> Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("> Shutdown signal received (Ctrl+C)...");
        })
        .await?;

    tracing::info!("> Graceful shutdown complete.");
    Ok(())
}
