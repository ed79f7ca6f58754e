//! Notification hub: room-scoped event fan-out to live player connections.
//!
//! Connections register, then join the rooms (display ids) they want to
//! follow. `publish` serializes the event once and pushes it over each
//! member's channel; a slow or closed subscriber is skipped, never awaited.
//! Delivery is best-effort, at most once per subscriber per publish.

use adboard_core::{AdId, DisplayId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Events emitted to subscribed player connections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum HubEvent {
    /// The display's playlist changed; players should refresh
    DisplayUpdated {
        display_id: DisplayId,
    },
    /// A linked ad's metadata changed
    AdUpdated {
        display_id: DisplayId,
        ad_id: AdId,
    },
}

/// Client connection
struct ClientConnection {
    id: Uuid,
    rooms: HashSet<DisplayId>,
    tx: mpsc::UnboundedSender<String>,
}

/// NotificationHub instance
pub struct NotificationHub {
    connections: RwLock<HashMap<Uuid, ClientConnection>>,
    connection_count: AtomicU64,
}

impl NotificationHub {
    /// Create new NotificationHub
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            connection_count: AtomicU64::new(0),
        }
    }

    /// Register a new client connection
    pub async fn register(&self) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();

        let conn = ClientConnection {
            id,
            rooms: HashSet::new(),
            tx,
        };

        {
            let mut connections = self.connections.write().await;
            connections.insert(id, conn);
        }

        self.connection_count.fetch_add(1, Ordering::Relaxed);

        tracing::info!(connection_id = %id, "Client connected");

        (id, rx)
    }

    /// Unregister a client, dropping all its room memberships
    pub async fn unregister(&self, id: &Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(id).is_some() {
            self.connection_count.fetch_sub(1, Ordering::Relaxed);
            tracing::info!(connection_id = %id, "Client disconnected");
        }
    }

    /// Join a display's room. A connection may be a member of several
    /// rooms at once; joining one it is already in is a no-op.
    pub async fn join(&self, id: &Uuid, display_id: DisplayId) {
        let mut connections = self.connections.write().await;
        if let Some(conn) = connections.get_mut(id) {
            if conn.rooms.insert(display_id) {
                tracing::info!(connection_id = %id, display_id = %display_id, "Client joined room");
            }
        }
    }

    /// Publish an event to every connection subscribed to the display
    pub async fn publish(&self, display_id: DisplayId, event: HubEvent) {
        let json = match serde_json::to_string(&event) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize event");
                return;
            }
        };

        let connections = self.connections.read().await;
        let mut delivered = 0usize;
        for conn in connections.values() {
            if conn.rooms.contains(&display_id) {
                if let Err(e) = conn.tx.send(json.clone()) {
                    tracing::warn!(connection_id = %conn.id, error = %e, "Failed to send event");
                } else {
                    delivered += 1;
                }
            }
        }

        tracing::debug!(
            display_id = %display_id,
            subscribers = %delivered,
            "Published event to room"
        );
    }

    /// Get connection count
    pub fn connection_count(&self) -> u64 {
        self.connection_count.load(Ordering::Relaxed)
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_only_room_members() {
        let hub = NotificationHub::new();
        let room1 = DisplayId::new(1);
        let room2 = DisplayId::new(2);

        let (a, mut rx_a) = hub.register().await;
        let (b, mut rx_b) = hub.register().await;
        let (c, mut rx_c) = hub.register().await;

        hub.join(&a, room1).await;
        hub.join(&b, room1).await;
        hub.join(&c, room2).await;

        hub.publish(room1, HubEvent::DisplayUpdated { display_id: room1 })
            .await;

        let expected = serde_json::to_string(&HubEvent::DisplayUpdated { display_id: room1 })
            .unwrap();
        assert_eq!(rx_a.try_recv().unwrap(), expected);
        assert_eq!(rx_b.try_recv().unwrap(), expected);
        assert!(rx_c.try_recv().is_err());

        // One message per subscriber per publish
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn closed_subscriber_does_not_fail_publish() {
        let hub = NotificationHub::new();
        let room = DisplayId::new(7);

        let (a, rx_a) = hub.register().await;
        let (b, mut rx_b) = hub.register().await;
        hub.join(&a, room).await;
        hub.join(&b, room).await;

        drop(rx_a);

        hub.publish(room, HubEvent::DisplayUpdated { display_id: room })
            .await;
        assert!(rx_b.try_recv().is_ok());
    }

    #[tokio::test]
    async fn unregister_drops_all_memberships() {
        let hub = NotificationHub::new();
        let room = DisplayId::new(3);

        let (a, mut rx_a) = hub.register().await;
        hub.join(&a, room).await;
        assert_eq!(hub.connection_count(), 1);

        hub.unregister(&a).await;
        assert_eq!(hub.connection_count(), 0);

        hub.publish(room, HubEvent::DisplayUpdated { display_id: room })
            .await;
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn membership_in_multiple_rooms() {
        let hub = NotificationHub::new();
        let room1 = DisplayId::new(1);
        let room2 = DisplayId::new(2);

        let (a, mut rx_a) = hub.register().await;
        hub.join(&a, room1).await;
        hub.join(&a, room2).await;

        hub.publish(
            room2,
            HubEvent::AdUpdated {
                display_id: room2,
                ad_id: AdId::new("ad-1"),
            },
        )
        .await;

        let msg = rx_a.try_recv().unwrap();
        assert!(msg.contains("\"ad_updated\""));
        assert!(msg.contains("\"ad-1\""));
    }
}
