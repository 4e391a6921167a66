use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::websockets::ChatMessage;

/// Broadcast address for everything said in a room
pub fn room_topic(room_id: &str) -> String {
    format!("room/{}", room_id)
}

/// Event bus for distributing chat messages to topic subscribers
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Topic-specific channels: topic -> sender
    topics: Arc<RwLock<HashMap<String, broadcast::Sender<ChatMessage>>>>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new event bus; `capacity` is the per-topic buffer size
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Publishes a message to all subscribers of a topic, returning how many
    /// subscribers received it. Topics nobody subscribed to are not created.
    pub async fn publish(&self, topic: &str, message: ChatMessage) -> usize {
        let sender = {
            let topics = self.topics.read().await;
            match topics.get(topic) {
                Some(sender) => sender.clone(),
                None => {
                    debug!(topic = %topic, "Message dropped, topic has no subscribers");
                    return 0;
                }
            }
        };

        match sender.send(message) {
            Ok(receiver_count) => {
                debug!(topic = %topic, receivers = receiver_count, "Message published");
                receiver_count
            }
            Err(_) => {
                debug!(topic = %topic, "Message published with no receivers");
                0
            }
        }
    }

    /// Subscribe to messages for a topic
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<ChatMessage> {
        self.sender_for(topic).await.subscribe()
    }

    /// Number of live subscribers on a topic
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        let topics = self.topics.read().await;
        topics
            .get(topic)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    async fn sender_for(&self, topic: &str) -> broadcast::Sender<ChatMessage> {
        {
            let topics = self.topics.read().await;
            if let Some(sender) = topics.get(topic) {
                return sender.clone();
            }
        }

        debug!(topic = %topic, "No topic channel found - creating one");
        let mut topics = self.topics.write().await;
        // another task may have created it between the two locks
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}
