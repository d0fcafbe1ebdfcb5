//! Writes notification rows for platform events.
//!
//! [`NotificationWriter`] subscribes to the event bus and, for each event,
//! inserts one notification row per target user. Targets are read from the
//! event payload, so handlers must include the relevant user ids when they
//! publish. Failures are logged and never stop the loop.

use exchange_core::types::DbId;
use exchange_db::repositories::NotificationRepo;
use exchange_db::DbPool;
use exchange_events::{event_types, PlatformEvent};
use tokio::sync::broadcast;

/// Fans platform events out to per-user notification rows.
pub struct NotificationWriter {
    pool: DbPool,
}

impl NotificationWriter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run the main fan-out loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](exchange_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.write_for_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to write notifications for event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification writer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification writer shutting down");
                    break;
                }
            }
        }
    }

    async fn write_for_event(&self, event: &PlatformEvent) -> Result<(), sqlx::Error> {
        for user_id in notification_targets(event) {
            NotificationRepo::create(&self.pool, user_id, &event.event_type, &event.payload)
                .await?;
        }
        Ok(())
    }
}

/// Determine which users should be notified about an event.
///
/// Events without notification semantics (e.g. `item.created`) yield no
/// targets. The actor is never notified about their own action.
pub fn notification_targets(event: &PlatformEvent) -> Vec<DbId> {
    let payload_id = |key: &str| event.payload.get(key).and_then(|v| v.as_i64());

    let targets: Vec<Option<DbId>> = match event.event_type.as_str() {
        // Someone asked for your item.
        event_types::EXCHANGE_REQUESTED => vec![payload_id("owner_id")],
        // The owner answered your request.
        event_types::EXCHANGE_ACCEPTED | event_types::EXCHANGE_REJECTED => {
            vec![payload_id("requester_id")]
        }
        // The requester withdrew; tell the owner.
        event_types::EXCHANGE_CANCELLED => vec![payload_id("owner_id")],
        event_types::EXCHANGE_COMPLETED => vec![payload_id("requester_id")],
        event_types::MESSAGE_SENT => vec![payload_id("recipient_id")],
        event_types::REPORT_RESOLVED => vec![payload_id("reporter_id")],
        event_types::ITEM_REMOVED_BY_ADMIN => vec![payload_id("owner_id")],
        _ => vec![],
    };

    targets
        .into_iter()
        .flatten()
        .filter(|&id| Some(id) != event.actor_user_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exchange_events::PlatformEvent;

    #[test]
    fn exchange_request_notifies_the_owner() {
        let event = PlatformEvent::new(event_types::EXCHANGE_REQUESTED)
            .with_actor(2)
            .with_payload(serde_json::json!({ "owner_id": 1, "requester_id": 2 }));
        assert_eq!(notification_targets(&event), vec![1]);
    }

    #[test]
    fn exchange_accept_notifies_the_requester() {
        let event = PlatformEvent::new(event_types::EXCHANGE_ACCEPTED)
            .with_actor(1)
            .with_payload(serde_json::json!({ "owner_id": 1, "requester_id": 2 }));
        assert_eq!(notification_targets(&event), vec![2]);
    }

    #[test]
    fn exchange_completion_notifies_the_requester_only() {
        let event = PlatformEvent::new(event_types::EXCHANGE_COMPLETED)
            .with_actor(1)
            .with_payload(serde_json::json!({ "owner_id": 1, "requester_id": 2 }));
        assert_eq!(notification_targets(&event), vec![2]);
    }

    #[test]
    fn message_notifies_the_recipient_not_the_sender() {
        let event = PlatformEvent::new(event_types::MESSAGE_SENT)
            .with_actor(2)
            .with_payload(serde_json::json!({ "recipient_id": 1, "sender_id": 2 }));
        assert_eq!(notification_targets(&event), vec![1]);
    }

    #[test]
    fn actor_is_never_notified_about_their_own_action() {
        let event = PlatformEvent::new(event_types::EXCHANGE_REQUESTED)
            .with_actor(1)
            .with_payload(serde_json::json!({ "owner_id": 1 }));
        assert!(notification_targets(&event).is_empty());
    }

    #[test]
    fn events_without_notification_semantics_yield_no_targets() {
        let event = PlatformEvent::new(event_types::ITEM_CREATED)
            .with_payload(serde_json::json!({ "owner_id": 1 }));
        assert!(notification_targets(&event).is_empty());
    }

    #[test]
    fn missing_payload_keys_are_tolerated() {
        let event = PlatformEvent::new(event_types::EXCHANGE_REQUESTED);
        assert!(notification_targets(&event).is_empty());
    }
}
