use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::membership::{duplicate_name, user_list};
use crate::room::{create_room, get_room, list_rooms};
use crate::shared::AppState;
use crate::websockets::websocket_handler;

/// Builds the HTTP + WebSocket router for the chat server
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .route("/rooms", get(list_rooms))
        .route("/room", post(create_room))
        .route("/room/:room_id", get(get_room))
        .route("/chat/userlist", get(user_list))
        .route("/chat/duplicate-name", get(duplicate_name))
        .route("/ws", get(websocket_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
