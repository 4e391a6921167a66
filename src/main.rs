use roomchat::{
    build_router, room::repository::InMemoryRoomRepository, AppState, EventBus, ServerConfig,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomchat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    info!(?config, "Starting chat server");

    // One registry instance for the lifetime of the server
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let event_bus = EventBus::new(config.topic_capacity);
    let app_state = AppState::new(room_repository, event_bus, &config);

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server running on http://{}", config.bind_address);
    axum::serve(listener, app).await
}
