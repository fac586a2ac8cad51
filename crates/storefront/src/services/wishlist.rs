//! Wishlist change notifications.
//!
//! Every effective wishlist mutation publishes one [`WishlistEvent`]. Open
//! event streams filter the broadcast by their own client id, so two tabs
//! of the same browser stay in sync without seeing other shoppers' changes.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Buffered events per subscriber before the slowest one starts lagging.
const BUS_CAPACITY: usize = 256;

/// Published after a wishlist changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEvent {
    pub client_id: Uuid,
    /// Item count after the change.
    pub count: usize,
}

/// In-process fan-out of wishlist events.
#[derive(Debug, Clone)]
pub struct WishlistBus {
    tx: broadcast::Sender<WishlistEvent>,
}

impl Default for WishlistBus {
    fn default() -> Self {
        Self::new()
    }
}

impl WishlistBus {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publish an event. Having no listeners is not an error.
    pub fn publish(&self, event: WishlistEvent) {
        let listeners = self.tx.send(event).unwrap_or(0);
        tracing::debug!(listeners, "Published wishlist event");
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WishlistEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let bus = WishlistBus::new();
        let mut rx = bus.subscribe();
        let client_id = Uuid::new_v4();

        bus.publish(WishlistEvent {
            client_id,
            count: 2,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.client_id, client_id);
        assert_eq!(event.count, 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_publish_without_listeners_is_fine() {
        let bus = WishlistBus::new();
        bus.publish(WishlistEvent {
            client_id: Uuid::new_v4(),
            count: 0,
        });
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let id = Uuid::nil();
        let json = serde_json::to_value(WishlistEvent {
            client_id: id,
            count: 3,
        })
        .unwrap();
        assert_eq!(json["clientId"], id.to_string());
        assert_eq!(json["count"], 3);
    }
}
