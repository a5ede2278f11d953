//! Notification bus seam
//!
//! Publishers and subscribers are decoupled and unaware of each other's
//! count; a publish never blocks on subscriber presence and carries no
//! delivery guarantee.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryEventBus;
pub use self::redis::RedisEventBus;

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::error::Result;

/// Messaging bus for change notifications
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Fire-and-forget send of `message` to `channel`
    async fn publish(&self, channel: &str, message: &str) -> Result<()>;

    /// Subscribe to `channel`, immediately publishing an empty wake message
    /// to it, then yield each subsequently received payload
    async fn subscribe(&self, channel: &str) -> Result<Subscription>;
}

/// Channel naming convention: `{redis_id}:{verb}:{resource}`
pub fn channel_name(id: Uuid, verb: &str, resource: &str) -> String {
    format!("{id}:{verb}:{resource}")
}

/// A live subscription to one bus channel.
///
/// Yields message payloads until the transport errors; not restartable.
/// Dropping it (normal completion, cancellation, or error) stops the backing
/// task, which unsubscribes the channel on every exit path.
pub struct Subscription {
    rx: mpsc::Receiver<String>,
    // Dropping the sender signals the backing task to tear down.
    _stop: oneshot::Sender<()>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::Receiver<String>, stop: oneshot::Sender<()>) -> Self {
        Self { rx, _stop: stop }
    }
}

impl Stream for Subscription {
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_name_follows_convention() {
        let id = Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
        assert_eq!(
            channel_name(id, "post", "items"),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6:post:items"
        );
    }
}
