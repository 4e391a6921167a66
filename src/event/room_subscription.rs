use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{bus::EventBus, subscriber::SubscriberError, subscriber::TopicSubscriber};

/// Forwards one topic's messages to a subscriber from a background task
pub struct RoomSubscription {
    topic: String,
    subscriber: Arc<dyn TopicSubscriber>,
    event_bus: EventBus,
}

impl RoomSubscription {
    pub fn new(topic: String, subscriber: Arc<dyn TopicSubscriber>, event_bus: EventBus) -> Self {
        Self {
            topic,
            subscriber,
            event_bus,
        }
    }

    /// Start the subscription. The receiver is registered before this returns,
    /// so anything published afterwards reaches the subscriber. The task runs
    /// until the subscriber reports its connection closed or the handle is aborted.
    pub async fn start(self) -> JoinHandle<()> {
        let topic = self.topic;
        let subscriber = self.subscriber;
        let subscriber_name = subscriber.subscriber_name();

        let mut receiver = self.event_bus.subscribe(&topic).await;

        info!(topic = %topic, subscriber = subscriber_name, "Starting topic subscription");

        tokio::spawn(async move {
            loop {
                let message = match receiver.recv().await {
                    Ok(message) => message,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            topic = %topic,
                            subscriber = subscriber_name,
                            skipped,
                            "Subscriber lagged, messages dropped"
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                debug!(
                    topic = %topic,
                    subscriber = subscriber_name,
                    message_type = ?message.message_type,
                    "Delivering topic message"
                );

                match subscriber.deliver(&topic, message).await {
                    Ok(()) => {}
                    Err(SubscriberError::ConnectionClosed(reason)) => {
                        debug!(topic = %topic, reason = %reason, "Subscriber connection closed");
                        break;
                    }
                    Err(e) => {
                        warn!(
                            topic = %topic,
                            subscriber = subscriber_name,
                            error = %e,
                            "Topic message delivery failed"
                        );
                    }
                }
            }

            info!(topic = %topic, subscriber = subscriber_name, "Topic subscription ended");
        })
    }
}
