//! Collection creation endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use tracing::info;

use super::{non_blank, parse_redis_id, ApiError};
use crate::bus::channel_name;
use crate::models::Collection;
use crate::response::{respond, ApiMessage};
use crate::AppState;

/// POST /post/collection
///
/// Create a collection in a specific db.
pub async fn create_collection(
    State(state): State<AppState>,
    Json(collection): Json<Collection>,
) -> Result<Response, ApiError> {
    let Some(redis_id) = parse_redis_id(&collection.redis_id) else {
        let content = ApiMessage::new(
            "POST Unsuccessful - redis_id invalid",
            StatusCode::BAD_REQUEST,
        );
        return Ok(respond(state.bus.as_ref(), content, None).await?);
    };

    let channel = channel_name(redis_id, "post", "collection");

    let Some(collection_name) = non_blank(&collection.collection_name) else {
        let content = ApiMessage::new(
            "collection_name not in request JSON",
            StatusCode::BAD_REQUEST,
        );
        return Ok(respond(state.bus.as_ref(), content, Some(&channel)).await?);
    };

    let db = collection.db_name.as_deref().unwrap_or(&state.default_db);

    // The only store call whose failure maps into the enveloped 500 rather
    // than the API error path.
    let content = match state.store.create_collection(db, collection_name).await {
        Ok(()) => {
            info!("created collection {db}.{collection_name}");
            ApiMessage::new("collection successfully created", StatusCode::CREATED)
        }
        Err(e) => ApiMessage::new(
            format!("failed to create collection with exception: {e}"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    };

    Ok(respond(state.bus.as_ref(), content, Some(&channel)).await?)
}
