// Public API - what other modules can use
pub use handlers::{create_room, get_room, list_rooms};
pub use service::RoomService;
pub use types::{RoomCreateRequest, RoomResponse};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
mod types;
