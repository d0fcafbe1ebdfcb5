//! Event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application. Any
//! number of subscribers independently receive every published event;
//! publishing with zero subscribers silently drops the event.

use chrono::{DateTime, Utc};
use exchange_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event type names published by the API layer.
pub mod event_types {
    pub const ITEM_CREATED: &str = "item.created";
    pub const ITEM_REMOVED_BY_ADMIN: &str = "item.removed_by_admin";
    pub const EXCHANGE_REQUESTED: &str = "exchange.requested";
    pub const EXCHANGE_ACCEPTED: &str = "exchange.accepted";
    pub const EXCHANGE_REJECTED: &str = "exchange.rejected";
    pub const EXCHANGE_CANCELLED: &str = "exchange.cancelled";
    pub const EXCHANGE_COMPLETED: &str = "exchange.completed";
    pub const MESSAGE_SENT: &str = "message.sent";
    pub const REPORT_FILED: &str = "report.filed";
    pub const REPORT_RESOLVED: &str = "report.resolved";
}

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name from [`event_types`].
    pub event_type: String,

    /// Source entity kind (e.g. `"item"`, `"exchange"`, `"report"`).
    pub source_entity_type: Option<String>,

    /// Source entity database id.
    pub source_entity_id: Option<DbId>,

    /// Id of the user that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data; the notification writer reads target user ids
    /// out of here.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach a source entity to the event.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: PlatformEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Create a new subscription receiving all events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            PlatformEvent::new(event_types::EXCHANGE_REQUESTED)
                .with_source("exchange", 7)
                .with_actor(3)
                .with_payload(serde_json::json!({ "owner_id": 1 })),
        );

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, event_types::EXCHANGE_REQUESTED);
        assert_eq!(event.source_entity_id, Some(7));
        assert_eq!(event.actor_user_id, Some(3));
        assert_eq!(event.payload["owner_id"], 1);
    }

    #[tokio::test]
    async fn publish_without_subscribers_does_not_error() {
        let bus = EventBus::default();
        bus.publish(PlatformEvent::new(event_types::ITEM_CREATED));
    }

    #[tokio::test]
    async fn each_subscriber_gets_every_event() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(PlatformEvent::new(event_types::MESSAGE_SENT));

        assert_eq!(a.recv().await.unwrap().event_type, event_types::MESSAGE_SENT);
        assert_eq!(b.recv().await.unwrap().event_type, event_types::MESSAGE_SENT);
    }
}
