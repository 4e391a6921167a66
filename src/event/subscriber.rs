use async_trait::async_trait;
use thiserror::Error;

use crate::websockets::ChatMessage;

/// Errors that can occur when delivering a topic message
#[derive(Debug, Error)]
pub enum SubscriberError {
    /// The receiving side is gone; the subscription should stop
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Trait for components that consume messages published on a topic
#[async_trait]
pub trait TopicSubscriber: Send + Sync {
    async fn deliver(&self, topic: &str, message: ChatMessage) -> Result<(), SubscriberError>;

    /// Get a human-readable name for this subscriber (for logging/debugging)
    fn subscriber_name(&self) -> &'static str;
}
