// Topic-based publish/subscribe used to fan chat messages out to a room

// Public API - what other modules can use
pub use bus::{room_topic, EventBus};
pub use room_subscription::RoomSubscription;
pub use subscriber::{SubscriberError, TopicSubscriber};

// Internal modules
mod bus;
mod room_subscription;
mod subscriber;
