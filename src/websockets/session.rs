use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::messages::ChatMessage;
use crate::event::{SubscriberError, TopicSubscriber};

/// The room membership a transport session currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMembership {
    pub session_id: String,
    pub room_id: String,
}

/// Per-connection attributes, living exactly as long as the transport connection
pub struct SessionState {
    connection_id: String,
    outbound: mpsc::UnboundedSender<String>,
    membership: Option<SessionMembership>,
    subscription: Option<JoinHandle<()>>,
}

impl SessionState {
    pub fn new(connection_id: String, outbound: mpsc::UnboundedSender<String>) -> Self {
        Self {
            connection_id,
            outbound,
            membership: None,
            subscription: None,
        }
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    pub fn outbound(&self) -> &mpsc::UnboundedSender<String> {
        &self.outbound
    }

    pub fn membership(&self) -> Option<&SessionMembership> {
        self.membership.as_ref()
    }

    pub fn is_joined(&self) -> bool {
        self.membership.is_some()
    }

    /// Records a membership together with the task feeding this connection
    /// the room's topic
    pub fn attach(&mut self, membership: SessionMembership, subscription: JoinHandle<()>) {
        if let Some(previous) = self.subscription.replace(subscription) {
            previous.abort();
        }
        self.membership = Some(membership);
    }

    /// Clears the membership and stops the topic subscription
    pub fn detach(&mut self) -> Option<SessionMembership> {
        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }
        self.membership.take()
    }

    /// Sends a message straight to this connection, bypassing any topic
    pub fn send(&self, message: &ChatMessage) -> Result<(), SubscriberError> {
        send_json(&self.outbound, message)
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }
    }
}

fn send_json(
    outbound: &mpsc::UnboundedSender<String>,
    message: &ChatMessage,
) -> Result<(), SubscriberError> {
    let message_json = serde_json::to_string(message)
        .map_err(|e| SubscriberError::DeliveryFailed(format!("Failed to serialize message: {}", e)))?;

    outbound
        .send(message_json)
        .map_err(|_| SubscriberError::ConnectionClosed("Outbound channel closed".to_string()))
}

/// Topic subscriber that pushes each message onto one connection's outbound queue
pub struct OutboundForwarder {
    connection_id: String,
    outbound: mpsc::UnboundedSender<String>,
}

impl OutboundForwarder {
    pub fn new(session: &SessionState) -> Self {
        Self {
            connection_id: session.connection_id.clone(),
            outbound: session.outbound.clone(),
        }
    }
}

#[async_trait]
impl TopicSubscriber for OutboundForwarder {
    async fn deliver(&self, topic: &str, message: ChatMessage) -> Result<(), SubscriberError> {
        debug!(
            topic = %topic,
            connection_id = %self.connection_id,
            "Forwarding topic message to connection"
        );
        send_json(&self.outbound, &message)
    }

    fn subscriber_name(&self) -> &'static str {
        "OutboundForwarder"
    }
}
