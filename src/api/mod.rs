//! HTTP request handlers
//!
//! Thin verb+path -> db-layer mapping. Every handler returns
//! `Result<_, Error>`; the error's `IntoResponse` impl does the status
//! translation (NotFound -> 404, Conflict/InvalidInput -> 400, rest -> 500).

use axum::Json;
use serde::Serialize;

pub mod progress;
pub mod reviews;
pub mod users;
pub mod videos;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

/// GET /health - liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "elimu-backend".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
