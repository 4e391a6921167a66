use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::event::EventBus;
use crate::membership::MembershipService;
use crate::room::{repository::RoomRepository, RoomService};
use crate::websockets::SessionEventBridge;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_service: Arc<RoomService>,
    pub membership_service: Arc<MembershipService>,
    pub session_bridge: Arc<SessionEventBridge>,
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires the services around a single registry instance and event bus
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        event_bus: EventBus,
        config: &ServerConfig,
    ) -> Self {
        let room_service = Arc::new(RoomService::new(Arc::clone(&room_repository)));
        let membership_service = Arc::new(MembershipService::new(
            Arc::clone(&room_repository),
            config.max_suffix_attempts,
        ));
        let session_bridge = Arc::new(SessionEventBridge::new(
            Arc::clone(&membership_service),
            event_bus.clone(),
        ));

        Self {
            room_service,
            membership_service,
            session_bridge,
            event_bus,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
