use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::RoomModel;

/// Request payload for creating a new room
#[derive(Debug, Deserialize)]
pub struct RoomCreateRequest {
    pub room_name: String,
}

/// Response for room creation and room information.
/// Member session ids stay server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub name: String,
    pub user_count: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&RoomModel> for RoomResponse {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            user_count: room.user_count,
            created_at: room.created_at,
        }
    }
}
