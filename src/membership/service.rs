use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::naming::NameDeduplicator;
use crate::room::repository::{JoinRoomResult, LeaveRoomResult, RoomRepository};
use crate::shared::AppError;

/// Service for room membership: joining, leaving and naming members
pub struct MembershipService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    deduplicator: NameDeduplicator,
}

impl MembershipService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        max_suffix_attempts: usize,
    ) -> Self {
        Self {
            repository,
            deduplicator: NameDeduplicator::new(max_suffix_attempts),
        }
    }

    /// Adds a member to the room and returns their new session id.
    ///
    /// Name collisions are not checked here; callers wanting unique names
    /// should run the candidate through `dedupe_name` first.
    #[instrument(skip(self))]
    pub async fn join(&self, room_id: &str, display_name: &str) -> Result<String, AppError> {
        let session_id = Uuid::new_v4().to_string();

        match self
            .repository
            .add_member(room_id, &session_id, display_name)
            .await?
        {
            JoinRoomResult::Success(room) => {
                info!(
                    room_id = %room_id,
                    session_id = %session_id,
                    display_name = %display_name,
                    user_count = room.user_count,
                    "Member joined room"
                );
                Ok(session_id)
            }
            JoinRoomResult::RoomNotFound => {
                Err(AppError::NotFound(format!("Room {} not found", room_id)))
            }
        }
    }

    /// Removes a member, returning the display name they held.
    /// Unknown rooms and sessions are a silent no-op.
    #[instrument(skip(self))]
    pub async fn leave(&self, room_id: &str, session_id: &str) -> Result<Option<String>, AppError> {
        match self.repository.remove_member(room_id, session_id).await? {
            LeaveRoomResult::Success { display_name, room } => {
                info!(
                    room_id = %room_id,
                    session_id = %session_id,
                    display_name = %display_name,
                    user_count = room.user_count,
                    "Member left room"
                );
                Ok(Some(display_name))
            }
            LeaveRoomResult::MemberNotInRoom => {
                debug!(room_id = %room_id, session_id = %session_id, "Leave ignored, not a member");
                Ok(None)
            }
            LeaveRoomResult::RoomNotFound => {
                debug!(room_id = %room_id, "Leave ignored, room not found");
                Ok(None)
            }
        }
    }

    /// Display name held by a session, if the room and session both exist
    #[instrument(skip(self))]
    pub async fn resolve_name(
        &self,
        room_id: &str,
        session_id: &str,
    ) -> Result<Option<String>, AppError> {
        let room = self.repository.get_room(room_id).await?;
        Ok(room.and_then(|r| r.member_name(session_id).cloned()))
    }

    /// Display names of all current members, in no particular order
    #[instrument(skip(self))]
    pub async fn list_members(&self, room_id: &str) -> Result<Vec<String>, AppError> {
        let room = self
            .repository
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?;
        Ok(room.member_names())
    }

    /// Returns `candidate` if no member of the room holds it, otherwise a
    /// suffixed variant that is free at the time of the call
    #[instrument(skip(self))]
    pub async fn dedupe_name(&self, room_id: &str, candidate: &str) -> Result<String, AppError> {
        let room = self
            .repository
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?;

        let name = self
            .deduplicator
            .dedupe(candidate, |name| room.has_member_named(name));

        debug!(room_id = %room_id, candidate = %candidate, name = %name, "Name checked");
        Ok(name)
    }
}
