//! Item endpoints: list (validation only) and create

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mongodb::bson::Bson;
use serde_json::Value;
use tracing::debug;

use super::{non_blank, parse_redis_id, ApiError};
use crate::bus::channel_name;
use crate::error::Error;
use crate::models::{Collection, Item};
use crate::response::{respond, ApiMessage};
use crate::AppState;

/// GET /get/items
///
/// Should return all entries in `db_name`.`collection_name`; only the
/// validation half is implemented so far.
pub async fn list_items(
    State(state): State<AppState>,
    Json(collection): Json<Collection>,
) -> Result<Response, ApiError> {
    let Some(redis_id) = parse_redis_id(&collection.redis_id) else {
        let content = ApiMessage::new(
            "redis_id missing or not a valid UUID",
            StatusCode::BAD_REQUEST,
        );
        return Ok(respond(state.bus.as_ref(), content, None).await?);
    };

    if non_blank(&collection.collection_name).is_none() {
        let channel = channel_name(redis_id, "get", "entries");
        let content = ApiMessage::new(
            "collection_name not in request JSON",
            StatusCode::BAD_REQUEST,
        );
        return Ok(respond(state.bus.as_ref(), content, Some(&channel)).await?);
    }

    // TODO: run the list query once its read contract is decided. Until
    // then a validated request gets an empty 200.
    Ok(Json(Value::Null).into_response())
}

/// POST /post/items
///
/// Create an item in the specified db and collection.
pub async fn create_item(
    State(state): State<AppState>,
    Json(item): Json<Item>,
) -> Result<Response, ApiError> {
    let Some(redis_id) = parse_redis_id(&item.redis_id) else {
        let content = ApiMessage::new(
            "POST Unsuccessful - redis_id invalid",
            StatusCode::BAD_REQUEST,
        );
        return Ok(respond(state.bus.as_ref(), content, None).await?);
    };

    let channel = channel_name(redis_id, "post", "items");
    let db = item.db_name.as_deref().unwrap_or(&state.default_db);

    let Some(collection_name) = non_blank(&item.collection_name) else {
        let content = ApiMessage::new(
            "POST Unsuccessful - collection_name not in request JSON",
            StatusCode::BAD_REQUEST,
        );
        return Ok(respond(state.bus.as_ref(), content, Some(&channel)).await?);
    };

    let existing = state.store.collection_names(db).await?;
    if !existing.iter().any(|name| name == collection_name) {
        let content = ApiMessage::new(
            format!("POST Unsuccessful - collection '{collection_name}' does not exist"),
            StatusCode::NOT_FOUND,
        );
        return Ok(respond(state.bus.as_ref(), content, Some(&channel)).await?);
    }

    let document = item.to_storage_document(redis_id);
    let inserted_id = state
        .store
        .insert_item(db, collection_name, document)
        .await?;

    // Re-fetch by the generated identifier to confirm the write landed.
    let created = state
        .store
        .find_item(db, collection_name, &inserted_id)
        .await?
        .ok_or_else(|| Error::Internal(format!("inserted item {inserted_id} not found")))?;

    debug!("created item in {db}.{collection_name}");

    let content = ApiMessage::new(
        format!(
            "POST Successful - created entry for item: {} with item_id: {}",
            item.name.as_deref().unwrap_or(""),
            created.get("_id").cloned().unwrap_or(Bson::Null),
        ),
        StatusCode::CREATED,
    );
    Ok(respond(state.bus.as_ref(), content, Some(&channel)).await?)
}
