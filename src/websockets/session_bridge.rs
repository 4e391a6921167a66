use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::messages::ChatMessage;
use super::session::{OutboundForwarder, SessionMembership, SessionState};
use crate::event::{room_topic, EventBus, RoomSubscription};
use crate::membership::MembershipService;
use crate::shared::AppError;

/// Translates per-connection chat events into membership changes and
/// publishes the results on the room's topic
pub struct SessionEventBridge {
    membership: Arc<MembershipService>,
    event_bus: EventBus,
}

impl SessionEventBridge {
    pub fn new(membership: Arc<MembershipService>, event_bus: EventBus) -> Self {
        Self {
            membership,
            event_bus,
        }
    }

    /// Joins the session to a room and announces it.
    ///
    /// The connection is subscribed to the room topic before the ENTER notice
    /// goes out, so the joining client sees its own entry.
    #[instrument(skip(self, session), fields(connection_id = %session.connection_id()))]
    pub async fn on_join(
        &self,
        session: &mut SessionState,
        room_id: &str,
        sender: &str,
    ) -> Result<(), AppError> {
        if let Some(existing) = session.membership() {
            warn!(
                room_id = %room_id,
                joined_room_id = %existing.room_id,
                "Session already holds a membership"
            );
            return Err(AppError::BadRequest(
                "Session already joined a room; leave it first".to_string(),
            ));
        }

        let session_id = self.membership.join(room_id, sender).await?;

        let topic = room_topic(room_id);
        let subscription = RoomSubscription::new(
            topic.clone(),
            Arc::new(OutboundForwarder::new(session)),
            self.event_bus.clone(),
        )
        .start()
        .await;

        session.attach(
            SessionMembership {
                session_id: session_id.clone(),
                room_id: room_id.to_string(),
            },
            subscription,
        );

        self.event_bus
            .publish(&topic, ChatMessage::enter(room_id, sender))
            .await;

        info!(room_id = %room_id, session_id = %session_id, sender = %sender, "Session joined room");
        Ok(())
    }

    /// Publishes a client message to its room unchanged.
    ///
    /// The frame's own `room_id` picks the topic; the session's room is the fallback.
    #[instrument(skip(self, session, message), fields(connection_id = %session.connection_id()))]
    pub async fn on_message(
        &self,
        session: &SessionState,
        message: ChatMessage,
    ) -> Result<usize, AppError> {
        let room_id = message
            .room_id
            .clone()
            .or_else(|| session.membership().map(|m| m.room_id.clone()))
            .ok_or_else(|| AppError::BadRequest("Message has no room_id".to_string()))?;

        let delivered = self.event_bus.publish(&room_topic(&room_id), message).await;

        debug!(room_id = %room_id, delivered, "Chat message relayed");
        Ok(delivered)
    }

    /// Ends the session's membership, if any, and announces the departure.
    ///
    /// Returns the LEAVE notice that was published. Nothing is published when
    /// the session never joined or its member entry is already gone.
    #[instrument(skip(self, session), fields(connection_id = %session.connection_id()))]
    pub async fn on_disconnect(&self, session: &mut SessionState) -> Option<ChatMessage> {
        let SessionMembership {
            session_id,
            room_id,
        } = match session.detach() {
            Some(membership) => membership,
            None => {
                debug!("Disconnect without membership, nothing to announce");
                return None;
            }
        };

        let display_name = match self.membership.leave(&room_id, &session_id).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                debug!(room_id = %room_id, session_id = %session_id, "No display name to announce");
                return None;
            }
            Err(e) => {
                warn!(room_id = %room_id, session_id = %session_id, error = %e, "Failed to leave room");
                return None;
            }
        };

        let notice = ChatMessage::leave(&room_id, &display_name);
        self.event_bus
            .publish(&room_topic(&room_id), notice.clone())
            .await;

        info!(room_id = %room_id, display_name = %display_name, "Session left room");
        Some(notice)
    }
}
