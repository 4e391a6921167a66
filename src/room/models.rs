use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory record for a chat room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String,   // UUID v4
    pub name: String, // Display name, not unique
    pub user_count: u64,
    pub members: HashMap<String, String>, // session id -> display name
    pub created_at: DateTime<Utc>,
}

impl RoomModel {
    /// Creates a new empty room with a generated ID
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            user_count: 0,
            members: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a member under the given session id and bumps the user count
    pub fn add_member(&mut self, session_id: String, display_name: String) {
        if self.members.insert(session_id, display_name).is_none() {
            self.user_count += 1;
        }
    }

    /// Removes a member, returning their display name if they were present.
    /// The user count only moves when an entry was removed and never underflows.
    pub fn remove_member(&mut self, session_id: &str) -> Option<String> {
        let removed = self.members.remove(session_id);
        if removed.is_some() {
            self.user_count = self.user_count.saturating_sub(1);
        }
        removed
    }

    pub fn member_name(&self, session_id: &str) -> Option<&String> {
        self.members.get(session_id)
    }

    /// Display names of all members, in map iteration order
    pub fn member_names(&self) -> Vec<String> {
        self.members.values().cloned().collect()
    }

    pub fn has_member_named(&self, display_name: &str) -> bool {
        self.members.values().any(|name| name == display_name)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
