use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

use super::models::RoomModel;
use crate::shared::AppError;

/// Result of attempting to add a member to a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Member was added, returns updated room data
    Success(RoomModel),
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to remove a member from a room
#[derive(Debug, Clone)]
pub enum LeaveRoomResult {
    /// Member was removed, returns their display name and the updated room
    Success {
        display_name: String,
        room: RoomModel,
    },
    /// Session id was not a member of the room
    MemberNotInRoom,
    /// Room does not exist
    RoomNotFound,
}

/// Trait for room registry operations
#[async_trait]
pub trait RoomRepository {
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError>;
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    /// Lists all rooms, most recently created first
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError>;

    /// Atomically inserts a member and bumps the room's user count
    async fn add_member(
        &self,
        room_id: &str,
        session_id: &str,
        display_name: &str,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically removes a member and decrements the room's user count
    async fn remove_member(
        &self,
        room_id: &str,
        session_id: &str,
    ) -> Result<LeaveRoomResult, AppError>;
}

#[derive(Default)]
struct RoomTable {
    rooms: HashMap<String, RoomModel>,
    // room ids in creation order
    order: Vec<String>,
}

/// In-memory implementation of RoomRepository
pub struct InMemoryRoomRepository {
    table: Mutex<RoomTable>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            table: Mutex::new(RoomTable::default()),
        }
    }

    fn table(&self) -> Result<MutexGuard<'_, RoomTable>, AppError> {
        self.table
            .lock()
            .map_err(|_| AppError::Storage("Room table lock poisoned".to_string()))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, room_name = %room.name, "Creating room in memory");

        let mut table = self.table()?;
        if table.rooms.contains_key(&room.id) {
            warn!(room_id = %room.id, "Room already exists in memory");
            return Err(AppError::Storage("Room already exists".to_string()));
        }
        table.rooms.insert(room.id.clone(), room.clone());
        table.order.push(room.id.clone());

        debug!(room_id = %room.id, "Room created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        let table = self.table()?;
        let room = table.rooms.get(room_id).cloned();

        match &room {
            Some(r) => debug!(room_id = %room_id, room_name = %r.name, "Room found in memory"),
            None => debug!(room_id = %room_id, "Room not found in memory"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        let table = self.table()?;
        let room_list: Vec<RoomModel> = table
            .order
            .iter()
            .rev()
            .filter_map(|id| table.rooms.get(id).cloned())
            .collect();

        debug!(room_count = room_list.len(), "Rooms listed from memory");
        Ok(room_list)
    }

    #[instrument(skip(self))]
    async fn add_member(
        &self,
        room_id: &str,
        session_id: &str,
        display_name: &str,
    ) -> Result<JoinRoomResult, AppError> {
        let mut table = self.table()?;

        let room = match table.rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(JoinRoomResult::RoomNotFound);
            }
        };

        room.add_member(session_id.to_string(), display_name.to_string());
        let updated_room = room.clone();

        info!(
            room_id = %room_id,
            display_name = %display_name,
            user_count = updated_room.user_count,
            "Member added to room"
        );

        Ok(JoinRoomResult::Success(updated_room))
    }

    #[instrument(skip(self))]
    async fn remove_member(
        &self,
        room_id: &str,
        session_id: &str,
    ) -> Result<LeaveRoomResult, AppError> {
        let mut table = self.table()?;

        let room = match table.rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(LeaveRoomResult::RoomNotFound);
            }
        };

        let display_name = match room.remove_member(session_id) {
            Some(name) => name,
            None => {
                debug!(room_id = %room_id, session_id = %session_id, "Member not in room");
                return Ok(LeaveRoomResult::MemberNotInRoom);
            }
        };

        info!(
            room_id = %room_id,
            display_name = %display_name,
            user_count = room.user_count,
            "Member removed from room"
        );

        Ok(LeaveRoomResult::Success {
            display_name,
            room: room.clone(),
        })
    }
}
