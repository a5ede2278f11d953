//! HTTP API handlers

pub mod collections;
pub mod health;
pub mod items;

pub use collections::create_collection;
pub use health::{health_check, health_routes, read_root};
pub use items::{create_item, list_items};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::error::Error;

/// Errors that escape a handler (store or bus failures outside the enveloped
/// branches). Client-input branches answer with envelopes instead.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Parse the client-supplied correlation UUID; absent and malformed are
/// treated alike
pub(crate) fn parse_redis_id(redis_id: &Option<String>) -> Option<Uuid> {
    redis_id.as_deref().and_then(|s| Uuid::parse_str(s).ok())
}

pub(crate) fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}
