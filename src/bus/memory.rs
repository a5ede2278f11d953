//! In-process notification bus
//!
//! Per-channel broadcast fan-out with a recorded publish history. Used by
//! the tests and suitable for single-process deployments.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_stream::wrappers::BroadcastStream;

use super::{EventBus, Subscription};
use crate::error::Result;

const CHANNEL_CAPACITY: usize = 64;

/// Notification bus backed by in-process broadcast channels
#[derive(Default)]
pub struct MemoryEventBus {
    channels: Mutex<HashMap<String, broadcast::Sender<String>>>,
    history: Mutex<Vec<(String, String)>>,
}

impl MemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn sender(&self, channel: &str) -> broadcast::Sender<String> {
        self.channels
            .lock()
            .unwrap()
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }

    /// Every `(channel, message)` publish in order
    pub fn history(&self) -> Vec<(String, String)> {
        self.history.lock().unwrap().clone()
    }

    /// Messages published to one channel, in order
    pub fn published_to(&self, channel: &str) -> Vec<String> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == channel)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl EventBus for MemoryEventBus {
    async fn publish(&self, channel: &str, message: &str) -> Result<()> {
        self.history
            .lock()
            .unwrap()
            .push((channel.to_string(), message.to_string()));
        // No subscribers is fine; publish is fire and forget.
        let _ = self.sender(channel).send(message.to_string());
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<Subscription> {
        let broadcast_rx = self.sender(channel).subscribe();
        self.publish(channel, "").await?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let mut messages = BroadcastStream::new(broadcast_rx);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    msg = messages.next() => match msg {
                        Some(Ok(payload)) => {
                            if tx.send(payload).await.is_err() {
                                break;
                            }
                        }
                        // Lagged receivers and closed channels both end the
                        // sequence, matching the transport-error contract.
                        Some(Err(_)) | None => break,
                    }
                }
            }
        });

        Ok(Subscription::new(rx, stop_tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_publishes_wake_message() {
        let bus = MemoryEventBus::new();

        let mut first = bus.subscribe("chan").await.unwrap();
        assert_eq!(first.next().await, Some(String::new()));

        // A second subscriber's wake is observable by the first.
        let _second = bus.subscribe("chan").await.unwrap();
        assert_eq!(first.next().await, Some(String::new()));
    }

    #[tokio::test]
    async fn published_messages_arrive_in_order() {
        let bus = MemoryEventBus::new();
        let mut sub = bus.subscribe("chan").await.unwrap();
        assert_eq!(sub.next().await, Some(String::new()));

        bus.publish("chan", "one").await.unwrap();
        bus.publish("chan", "two").await.unwrap();

        assert_eq!(sub.next().await, Some("one".to_string()));
        assert_eq!(sub.next().await, Some("two".to_string()));
        assert_eq!(bus.published_to("chan").len(), 3);
    }

    #[tokio::test]
    async fn publish_without_subscribers_succeeds() {
        let bus = MemoryEventBus::new();
        bus.publish("nobody-listening", "hello").await.unwrap();
        assert_eq!(
            bus.history(),
            vec![("nobody-listening".to_string(), "hello".to_string())]
        );
    }
}
