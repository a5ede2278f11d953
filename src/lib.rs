//! docrelay library - document CRUD with change notifications
//!
//! Stores items and collections in a document database and publishes the
//! outcome of each request to a notification channel named after the
//! client-supplied correlation UUID (`{redis_id}:{verb}:{resource}`).

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod bus;
pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod response;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};

use bus::EventBus;
use store::DocumentStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Document store backend
    pub store: Arc<dyn DocumentStore>,
    /// Notification bus backend
    pub bus: Arc<dyn EventBus>,
    /// Database used when a request omits `db_name`
    pub default_db: String,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: Arc<dyn DocumentStore>,
        bus: Arc<dyn EventBus>,
        default_db: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bus,
            default_db: default_db.into(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/get/items", get(api::list_items))
        .route("/post/collection", post(api::create_collection))
        .route("/post/items", post(api::create_item))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
