#![allow(dead_code)] // Not every test binary uses every action

use serde_json::json;
use tokio::time::{sleep, Duration};

use roomchat::MessageHandler;

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a raw text frame from a client and wait for fan-out
    pub async fn send_raw(&self, name: &str, frame: String) {
        {
            let mut clients = self.clients.lock().await;
            let client = clients
                .get_mut(name)
                .unwrap_or_else(|| panic!("unknown client {}", name));
            self.input_handler
                .handle_message(&mut client.session, frame)
                .await;
        }
        sleep(Duration::from_millis(10)).await;
    }

    /// Simulate the socket closing for a client and wait for fan-out
    pub async fn disconnect(&self, name: &str) {
        {
            let mut clients = self.clients.lock().await;
            let client = clients
                .get_mut(name)
                .unwrap_or_else(|| panic!("unknown client {}", name));
            self.input_handler
                .handle_disconnect(&mut client.session)
                .await;
        }
        sleep(Duration::from_millis(10)).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        sleep(Duration::from_millis(10)).await;
        for client in self.clients.lock().await.values_mut() {
            client.clear_messages();
        }
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Enter the default room under the client's own name
    pub async fn send_enter(&self, name: &str) {
        self.send_enter_as(name, name).await;
    }

    /// Enter the default room under a chosen display name
    pub async fn send_enter_as(&self, name: &str, display_name: &str) {
        let frame = json!({
            "type": "ENTER",
            "room_id": self.room_id,
            "sender": display_name,
        });
        self.send_raw(name, frame.to_string()).await;
    }

    /// Send a chat line to the default room
    pub async fn send_talk(&self, name: &str, text: &str) {
        let frame = json!({
            "type": "TALK",
            "room_id": self.room_id,
            "sender": name,
            "message": text,
        });
        self.send_raw(name, frame.to_string()).await;
    }

    /// Explicitly leave the current room
    pub async fn send_leave(&self, name: &str) {
        self.send_raw(name, json!({ "type": "LEAVE" }).to_string())
            .await;
    }

    /// Whether the client's session currently holds a membership
    pub async fn is_joined(&self, name: &str) -> bool {
        self.clients.lock().await[name].session.is_joined()
    }

    pub async fn member_names(&self) -> Vec<String> {
        let mut names = self
            .app_state
            .membership_service
            .list_members(&self.room_id)
            .await
            .unwrap();
        names.sort();
        names
    }
}
