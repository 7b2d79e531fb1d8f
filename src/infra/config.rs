//! Centralized configuration (environment variables + defaults).

use std::net::SocketAddr;

pub const DEFAULT_PATIENTS_FILE: &str = "patients.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_PREDICTOR_URL: &str = "http://127.0.0.1:8000/predict";

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Path of the JSON document holding the patient collection.
pub fn patients_file() -> String {
    var_or("PATIENTS_FILE", DEFAULT_PATIENTS_FILE)
}

/// Listen address for the API server.
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    let raw = var_or("BIND_ADDR", DEFAULT_BIND_ADDR);
    raw.parse::<SocketAddr>()
        .map_err(|e| anyhow::anyhow!("BIND_ADDR '{}' is not a valid socket address: {}", raw, e))
}

/// Endpoint of the external premium prediction service.
pub fn predictor_url() -> String {
    var_or("PREDICTOR_URL", DEFAULT_PREDICTOR_URL)
}

/// Installs the fmt subscriber used by the binaries (`RUST_LOG`, default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
