//! Root and health endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /
pub async fn read_root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// GET /health
///
/// Health check endpoint for monitoring.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "docrelay".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build root and health routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(read_root))
        .route("/health", get(health_check))
}
