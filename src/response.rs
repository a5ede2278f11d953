//! Response envelope and the publish-then-respond helper
//!
//! One canonical module for the response glue: the payload type, the
//! `{"content": <payload>, "status": <int>}` wire envelope, and a helper
//! that optionally publishes the payload before answering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::bus::EventBus;
use crate::error::Result;

/// Payload carried by every enveloped response
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub message: String,
    pub status: u16,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// Wire envelope: `{"content": <payload>, "status": <int>}`.
///
/// The HTTP status of the response equals the payload status.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub content: ApiMessage,
    pub status: u16,
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Publish `content` to `channel` when one is given, then answer with the
/// envelope. Publish failures propagate to the caller.
pub async fn respond(
    bus: &dyn EventBus,
    content: ApiMessage,
    channel: Option<&str>,
) -> Result<Response> {
    if let Some(channel) = channel {
        bus.publish(channel, &serde_json::to_string(&content)?)
            .await?;
    }
    let status = content.status;
    Ok(ResponseEnvelope { content, status }.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MemoryEventBus;
    use serde_json::json;

    #[test]
    fn envelope_wire_shape() {
        let envelope = ResponseEnvelope {
            content: ApiMessage::new("collection successfully created", StatusCode::CREATED),
            status: 201,
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "content": {
                    "message": "collection successfully created",
                    "status": 201,
                },
                "status": 201,
            })
        );
    }

    #[tokio::test]
    async fn respond_publishes_exactly_once_when_channel_given() {
        let bus = MemoryEventBus::new();
        let content = ApiMessage::new("hello", StatusCode::BAD_REQUEST);

        respond(&bus, content, Some("chan")).await.unwrap();

        let published = bus.published_to("chan");
        assert_eq!(published.len(), 1);
        let payload: serde_json::Value = serde_json::from_str(&published[0]).unwrap();
        assert_eq!(payload["message"], "hello");
        assert_eq!(payload["status"], 400);
    }

    #[tokio::test]
    async fn respond_without_channel_publishes_nothing() {
        let bus = MemoryEventBus::new();
        let content = ApiMessage::new("hello", StatusCode::OK);

        respond(&bus, content, None).await.unwrap();

        assert!(bus.history().is_empty());
    }
}
