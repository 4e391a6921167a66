use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::{RoomCreateRequest, RoomResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new room
///
/// POST /room
/// Returns room information with generated ID
#[instrument(name = "create_room", skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<RoomCreateRequest>,
) -> Result<Json<RoomResponse>, AppError> {
    info!(room_name = %request.room_name, "Creating new room");

    let room = state.room_service.create_room(request.room_name).await?;

    Ok(Json(RoomResponse::from(&room)))
}

/// HTTP handler for listing all rooms
///
/// GET /rooms
/// Returns array of all rooms, most recently created first
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, AppError> {
    let rooms = state.room_service.list_rooms().await?;

    info!(room_count = rooms.len(), "Rooms listed successfully");

    Ok(Json(rooms.iter().map(RoomResponse::from).collect()))
}

/// HTTP handler for fetching a single room
///
/// GET /room/:room_id
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomResponse>, AppError> {
    let room = state.room_service.require_room(&room_id).await?;
    Ok(Json(RoomResponse::from(&room)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/room", post(create_room))
            .route("/room/:room_id", get(get_room))
            .route("/rooms", get(list_rooms))
            .with_state(state)
    }

    fn create_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/room")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_room_handler() {
        let app_state = AppStateBuilder::new().build();

        let response = app(app_state)
            .oneshot(create_request(r#"{"room_name": "general"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let room_response: RoomResponse = serde_json::from_slice(&body).unwrap();

        assert!(!room_response.id.is_empty());
        assert_eq!(room_response.name, "general");
        assert_eq!(room_response.user_count, 0);
    }

    #[tokio::test]
    async fn test_create_room_handler_missing_field() {
        let app_state = AppStateBuilder::new().build();

        let response = app(app_state)
            .oneshot(create_request(r#"{"invalid": "json"}"#))
            .await
            .unwrap();

        // Should return 422 Unprocessable Entity for invalid JSON structure
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_room_handler_malformed_json() {
        let app_state = AppStateBuilder::new().build();

        let response = app(app_state)
            .oneshot(create_request(r#"{"room_name": "gen"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_room_handler() {
        let app_state = AppStateBuilder::new().build();
        let room = app_state
            .room_service
            .create_room("general".to_string())
            .await
            .unwrap();

        let request = Request::builder()
            .uri(format!("/room/{}", room.id))
            .body(Body::empty())
            .unwrap();
        let response = app(app_state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let room_response: RoomResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(room_response.id, room.id);
        assert_eq!(room_response.name, "general");
    }

    #[tokio::test]
    async fn test_get_room_handler_not_found() {
        let app_state = AppStateBuilder::new().build();

        let request = Request::builder()
            .uri("/room/does-not-exist")
            .body(Body::empty())
            .unwrap();
        let response = app(app_state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_rooms_handler_empty() {
        let app_state = AppStateBuilder::new().build();

        let request = Request::builder()
            .uri("/rooms")
            .body(Body::empty())
            .unwrap();
        let response = app(app_state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rooms: Vec<RoomResponse> = serde_json::from_slice(&body).unwrap();
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_list_rooms_handler_most_recent_first() {
        let app_state = AppStateBuilder::new().build();
        for name in ["lobby", "random", "rust"] {
            app_state
                .room_service
                .create_room(name.to_string())
                .await
                .unwrap();
        }

        let request = Request::builder()
            .uri("/rooms")
            .body(Body::empty())
            .unwrap();
        let response = app(app_state).oneshot(request).await.unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let rooms: Vec<RoomResponse> = serde_json::from_slice(&body).unwrap();
        let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["rust", "random", "lobby"]);
    }
}
