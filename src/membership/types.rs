use serde::{Deserialize, Serialize};

/// Query parameters for listing a room's members
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub room_id: String,
}

/// Query parameters for checking a display name against a room
#[derive(Debug, Deserialize)]
pub struct DuplicateNameQuery {
    pub room_id: String,
    pub username: String,
}

/// A display name that is free in the room at the time of the check
#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateNameResponse {
    pub username: String,
}
