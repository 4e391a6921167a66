use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{models::RoomModel, repository::RoomRepository};
use crate::shared::AppError;

/// Service for room registry operations: create, look up and list rooms
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
}

impl RoomService {
    pub fn new(repository: Arc<dyn RoomRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Creates a new empty room with a generated ID.
    /// Room names are not required to be unique.
    #[instrument(skip(self))]
    pub async fn create_room(&self, name: String) -> Result<RoomModel, AppError> {
        let room = RoomModel::new(name);
        debug!(room_id = %room.id, "Generated room ID");

        self.repository.create_room(&room).await?;

        info!(room_id = %room.id, room_name = %room.name, "Room created successfully");
        Ok(room)
    }

    /// Looks up a room; an unknown id is `Ok(None)`, not an error
    #[instrument(skip(self))]
    pub async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        self.repository.get_room(room_id).await
    }

    /// Like `get_room`, but an unknown id becomes `AppError::NotFound`
    pub async fn require_room(&self, room_id: &str) -> Result<RoomModel, AppError> {
        self.get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))
    }

    /// Lists all rooms, most recently created first
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        let rooms = self.repository.list_rooms().await?;
        info!(room_count = rooms.len(), "Rooms retrieved successfully");
        Ok(rooms)
    }
}
