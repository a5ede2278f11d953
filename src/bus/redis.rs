//! Redis-backed notification bus

use async_trait::async_trait;
use futures::StreamExt;
use redis::AsyncCommands;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::{EventBus, Subscription};
use crate::error::Result;

const SUBSCRIPTION_BUFFER: usize = 64;

/// Notification bus over Redis pub/sub.
///
/// One multiplexed connection serves all publishes; each subscription gets a
/// dedicated pub/sub connection owned by a forwarding task.
pub struct RedisEventBus {
    client: redis::Client,
    conn: redis::aio::MultiplexedConnection,
}

impl RedisEventBus {
    /// Connect using the configured URL
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { client, conn })
    }
}

#[async_trait]
impl EventBus for RedisEventBus {
    async fn publish(&self, channel: &str, message: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.publish(channel, message).await?;
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<Subscription> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(channel).await?;

        // Wake message so a subscriber racing a publisher sees the channel
        // go live.
        self.publish(channel, "").await?;

        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let channel = channel.to_string();

        tokio::spawn(async move {
            {
                let mut messages = pubsub.on_message();
                loop {
                    tokio::select! {
                        _ = &mut stop_rx => break,
                        msg = messages.next() => {
                            let Some(msg) = msg else { break };
                            match msg.get_payload::<String>() {
                                Ok(payload) => {
                                    if tx.send(payload).await.is_err() {
                                        break;
                                    }
                                }
                                Err(e) => {
                                    warn!("undecodable message on {channel}: {e}");
                                    break;
                                }
                            }
                        }
                    }
                }
            }

            // Runs on every exit path: completion, cancellation, or error.
            if let Err(e) = pubsub.unsubscribe(&channel).await {
                warn!("unsubscribe from {channel} failed: {e}");
            }
            debug!("subscription to {channel} closed");
        });

        Ok(Subscription::new(rx, stop_tx))
    }
}
