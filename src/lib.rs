// Library crate for the multi-room chat server
// This file exposes the public API for integration tests

pub mod config;
pub mod event;
pub mod membership;
pub mod room;
pub mod routes;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use event::{room_topic, EventBus, RoomSubscription};
pub use membership::MembershipService;
pub use room::{models::RoomModel, repository::RoomRepository, RoomService};
pub use routes::build_router;
pub use shared::{AppError, AppState};
pub use websockets::{
    ChatMessage, MessageHandler, MessageType, SessionEventBridge, SessionState,
    WebsocketReceiveHandler,
};
