use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, instrument};

use super::types::{DuplicateNameQuery, DuplicateNameResponse, UserListQuery};
use crate::shared::{AppError, AppState};

/// HTTP handler listing the display names in a room
///
/// GET /chat/userlist?room_id=X
#[instrument(name = "user_list", skip(state))]
pub async fn user_list(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let members = state.membership_service.list_members(&query.room_id).await?;

    info!(room_id = %query.room_id, member_count = members.len(), "Members listed");

    Ok(Json(members))
}

/// HTTP handler returning a display name that is free in the room
///
/// GET /chat/duplicate-name?room_id=X&username=Y
#[instrument(name = "duplicate_name", skip(state))]
pub async fn duplicate_name(
    State(state): State<AppState>,
    Query(query): Query<DuplicateNameQuery>,
) -> Result<Json<DuplicateNameResponse>, AppError> {
    let username = state
        .membership_service
        .dedupe_name(&query.room_id, &query.username)
        .await?;

    info!(
        room_id = %query.room_id,
        requested = %query.username,
        username = %username,
        "Name checked for duplicates"
    );

    Ok(Json(DuplicateNameResponse { username }))
}
