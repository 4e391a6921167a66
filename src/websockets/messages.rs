use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server, echoed to the room
    Enter,
    Talk,
    Leave,

    // Server -> Client
    Error,
}

/// Metadata for server-composed messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// A chat frame, both as sent by clients and as published to a room topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub meta: Option<ChatMessageMeta>,
}

/// Helper functions for creating messages
impl ChatMessage {
    pub fn new(
        message_type: MessageType,
        room_id: Option<String>,
        sender: String,
        message: String,
    ) -> Self {
        Self {
            message_type,
            room_id,
            sender,
            message,
            meta: Some(ChatMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Create the ENTER notice published when someone joins a room
    pub fn enter(room_id: &str, sender: &str) -> Self {
        Self::new(
            MessageType::Enter,
            Some(room_id.to_string()),
            sender.to_string(),
            format!("{} entered the room.", sender),
        )
    }

    /// Create the LEAVE notice published when a member leaves or disconnects
    pub fn leave(room_id: &str, sender: &str) -> Self {
        Self::new(
            MessageType::Leave,
            Some(room_id.to_string()),
            sender.to_string(),
            format!("{} left the room.", sender),
        )
    }

    /// Create a TALK message
    pub fn talk(room_id: &str, sender: &str, message: &str) -> Self {
        Self::new(
            MessageType::Talk,
            Some(room_id.to_string()),
            sender.to_string(),
            message.to_string(),
        )
    }

    /// Create an ERROR message addressed to a single connection
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(MessageType::Error, None, String::new(), message.into())
    }
}
