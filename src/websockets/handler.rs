use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::messages::{ChatMessage, MessageType};
use super::session::SessionState;
use super::session_bridge::SessionEventBridge;
use super::socket::{Connection, MessageHandler};
use crate::shared::AppState;

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    bridge: Arc<SessionEventBridge>,
}

impl WebsocketReceiveHandler {
    pub fn new(bridge: Arc<SessionEventBridge>) -> Self {
        Self { bridge }
    }

    fn reply_error(session: &SessionState, error: impl ToString) {
        if let Err(e) = session.send(&ChatMessage::error(error.to_string())) {
            debug!(
                connection_id = %session.connection_id(),
                error = %e,
                "Could not deliver error reply"
            );
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, session: &mut SessionState, message: String) {
        debug!(
            connection_id = %session.connection_id(),
            message = %message,
            "Received message"
        );

        let chat_message = match serde_json::from_str::<ChatMessage>(&message) {
            Ok(chat_message) => chat_message,
            Err(e) => {
                warn!(
                    connection_id = %session.connection_id(),
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                Self::reply_error(session, format!("Invalid message: {}", e));
                return;
            }
        };

        match chat_message.message_type {
            MessageType::Enter => {
                let Some(room_id) = chat_message.room_id.as_deref() else {
                    Self::reply_error(session, "ENTER requires a room_id");
                    return;
                };
                if let Err(e) = self
                    .bridge
                    .on_join(session, room_id, &chat_message.sender)
                    .await
                {
                    Self::reply_error(session, e);
                }
            }
            MessageType::Talk => {
                if let Err(e) = self.bridge.on_message(session, chat_message).await {
                    Self::reply_error(session, e);
                }
            }
            MessageType::Leave => {
                self.bridge.on_disconnect(session).await;
            }
            MessageType::Error => {
                debug!(
                    connection_id = %session.connection_id(),
                    "Ignoring ERROR frame sent by client"
                );
            }
        }
    }

    async fn handle_disconnect(&self, session: &mut SessionState) {
        info!(connection_id = %session.connection_id(), "Connection closed, releasing session");
        self.bridge.on_disconnect(session).await;
    }
}

/// WebSocket endpoint
/// GET /ws
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    let connection_id = Uuid::new_v4().to_string();
    info!(connection_id = %connection_id, "WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, connection_id, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    connection_id: String,
    app_state: AppState,
) {
    info!(connection_id = %connection_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    let session = SessionState::new(connection_id.clone(), outbound_sender);

    let message_handler = Arc::new(WebsocketReceiveHandler::new(Arc::clone(
        &app_state.session_bridge,
    )));

    let connection = Connection::new(
        session,
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(connection_id = %connection_id, error = ?e, "WebSocket connection error");
        }
    }
}
