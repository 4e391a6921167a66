// Public API
pub use handler::{websocket_handler, WebsocketReceiveHandler};
pub use messages::{ChatMessage, ChatMessageMeta, MessageType};
pub use session::{OutboundForwarder, SessionMembership, SessionState};
pub use session_bridge::SessionEventBridge;
pub use socket::{Connection, MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod handler;
mod messages;
mod session;
mod session_bridge;
mod socket;
