use std::collections::HashMap;
use tokio::sync::Mutex;

use roomchat::{
    build_router, room::repository::InMemoryRoomRepository, AppState, EventBus, ServerConfig,
    WebsocketReceiveHandler,
};
use std::sync::Arc;

use super::mocks::MockClient;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app_state: AppState,
    pub room_id: String,
    pub input_handler: WebsocketReceiveHandler,
    pub clients: Mutex<HashMap<String, MockClient>>,
    pub names: Vec<String>,
}

pub struct TestSetupBuilder {
    names: Vec<String>,
    joined: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            names: vec![],
            joined: false,
        }
    }

    pub fn with_clients(mut self, names: Vec<&str>) -> Self {
        self.names = names.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_clients(self) -> Self {
        self.with_clients(vec!["alice", "bob"])
    }

    pub fn with_three_clients(self) -> Self {
        self.with_clients(vec!["alice", "bob", "charlie"])
    }

    /// Have every client enter the room during build, with inboxes cleared afterwards
    pub fn joined(mut self) -> Self {
        self.joined = true;
        self
    }

    pub async fn build(self) -> TestSetup {
        let config = ServerConfig::default();
        let event_bus = EventBus::new(config.topic_capacity);
        let app_state = AppState::new(Arc::new(InMemoryRoomRepository::new()), event_bus, &config);

        let room_id = app_state
            .room_service
            .create_room("general".to_string())
            .await
            .unwrap()
            .id;

        let clients = self
            .names
            .iter()
            .map(|name| (name.clone(), MockClient::new(&format!("conn-{}", name))))
            .collect();

        let input_handler = WebsocketReceiveHandler::new(app_state.session_bridge.clone());

        let setup = TestSetup {
            app_state,
            room_id,
            input_handler,
            clients: Mutex::new(clients),
            names: self.names,
        };

        if self.joined {
            for name in setup.names.clone() {
                setup.send_enter(&name).await;
            }
            setup.clear_messages().await;
        }

        setup
    }
}

impl TestSetup {
    #[allow(dead_code)]
    pub fn router(&self) -> axum::Router {
        build_router(self.app_state.clone())
    }
}
