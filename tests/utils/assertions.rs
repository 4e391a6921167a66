//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use roomchat::{ChatMessage, MessageType};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    clients: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for all clients in the setup
    pub fn for_all_clients(setup: &'a TestSetup) -> Self {
        let clients = setup.names.iter().map(|s| s.as_str()).collect();
        Self { setup, clients }
    }

    /// Create an assertion for specific clients
    pub fn for_clients(setup: &'a TestSetup, clients: Vec<&'a str>) -> Self {
        Self { setup, clients }
    }

    /// Assert that clients received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];
        let mut all_clients = self.setup.clients.lock().await;

        for name in &self.clients {
            let message = all_clients.get_mut(*name).unwrap().consume_message();
            assert!(message.is_some(), "{} should have received a message", name);

            let msg: ChatMessage = serde_json::from_str(&message.unwrap()).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                name
            );
            messages.push(msg);
        }

        // Everyone subscribed to a topic sees the identical frame
        for (i, msg) in messages.iter().enumerate().skip(1) {
            assert_eq!(
                msg, &messages[0],
                "{} message differs from {}",
                self.clients[i], self.clients[0]
            );
        }

        MessageContent {
            message: messages[0].clone(),
        }
    }

    /// Assert that clients received no messages
    pub async fn received_no_messages(self) {
        let mut all_clients = self.setup.clients.lock().await;
        for name in &self.clients {
            let messages = all_clients.get_mut(*name).unwrap().get_messages();
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                name,
                messages
            );
        }
    }

    /// Count how many messages of a specific type a client received (non-consuming)
    pub async fn count_message_type(&self, name: &str, msg_type: MessageType) -> usize {
        let mut all_clients = self.setup.clients.lock().await;
        all_clients
            .get_mut(name)
            .unwrap()
            .get_messages()
            .iter()
            .filter_map(|raw| serde_json::from_str::<ChatMessage>(raw).ok())
            .filter(|msg| msg.message_type == msg_type)
            .count()
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    message: ChatMessage,
}

impl MessageContent {
    /// Assert the message has a specific sender
    pub fn with_sender(self, expected_sender: &str) -> Self {
        assert_eq!(self.message.sender, expected_sender);
        self
    }

    /// Assert the message has specific text
    pub fn with_message(self, expected_message: &str) -> Self {
        assert_eq!(self.message.message, expected_message);
        self
    }

    /// Assert the message is addressed to a specific room
    pub fn in_room(self, expected_room: &str) -> Self {
        assert_eq!(self.message.room_id.as_deref(), Some(expected_room));
        self
    }

    pub fn into_message(self) -> ChatMessage {
        self.message
    }
}
