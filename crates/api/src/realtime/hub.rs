//! Broadcast hub for request lifecycle events.
//!
//! Events are fanned out on a global channel plus per-room channels
//! keyed `team:<id>` and `spoc:<id>`. Room channels are created when the
//! first subscriber joins and pruned once subscriber-free. Delivery is
//! fire-and-forget: sends to channels without receivers are dropped, and
//! a disconnected client misses events until it reconnects and
//! re-fetches the request list.

use domain::models::request::ServiceRequest;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Capacity of each broadcast channel. Receivers that lag past this many
/// buffered events skip the missed ones.
const CHANNEL_CAPACITY: usize = 256;

/// A single event delivered to realtime subscribers.
#[derive(Debug, Clone)]
pub struct OutboundEvent {
    pub name: &'static str,
    pub payload: serde_json::Value,
}

/// Broadcast hub partitioned into a global channel plus rooms.
#[derive(Clone)]
pub struct EventHub {
    global: broadcast::Sender<OutboundEvent>,
    rooms: Arc<Mutex<HashMap<String, broadcast::Sender<OutboundEvent>>>>,
}

impl EventHub {
    pub fn new() -> Self {
        let (global, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            global,
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Room name for a team id.
    pub fn team_room(team_id: &str) -> String {
        format!("team:{team_id}")
    }

    /// Room name for a SPOC id.
    pub fn spoc_room(spoc_id: &str) -> String {
        format!("spoc:{spoc_id}")
    }

    /// Subscribes to the global channel.
    pub fn subscribe_global(&self) -> broadcast::Receiver<OutboundEvent> {
        self.global.subscribe()
    }

    /// Joins a room, creating its channel on first use. Room names are
    /// caller-supplied strings; there is no membership check.
    pub fn subscribe_room(&self, room: &str) -> broadcast::Receiver<OutboundEvent> {
        let mut rooms = self.rooms.lock().unwrap();
        rooms
            .entry(room.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publishes a newly created request.
    pub fn request_created(&self, request: &ServiceRequest) {
        let Some(doc) = serialize_request(request) else {
            return;
        };
        self.send_global(OutboundEvent {
            name: "request:created",
            payload: doc.clone(),
        });
        if let Some(spoc_id) = request.spoc_id.as_deref() {
            self.send_room(
                &Self::spoc_room(spoc_id),
                OutboundEvent {
                    name: "request:created:forSpoc",
                    payload: doc.clone(),
                },
            );
        }
        if let Some(team_id) = request.team_id.as_deref() {
            self.send_room(
                &Self::team_room(team_id),
                OutboundEvent {
                    name: "request:created:forTeam",
                    payload: doc,
                },
            );
        }
    }

    /// Publishes an updated request. The scoped rooms receive the event
    /// under the same name as the global channel.
    pub fn request_updated(&self, request: &ServiceRequest) {
        let Some(doc) = serialize_request(request) else {
            return;
        };
        let event = OutboundEvent {
            name: "request:updated",
            payload: doc,
        };
        self.send_global(event.clone());
        self.send_scoped(request, event);
    }

    /// Publishes a deletion notice. The payload carries the id only.
    pub fn request_deleted(&self, request: &ServiceRequest) {
        let event = OutboundEvent {
            name: "request:deleted",
            payload: json!({ "id": request.id }),
        };
        self.send_global(event.clone());
        self.send_scoped(request, event);
    }

    /// Drops room channels that no longer have subscribers.
    pub fn prune_idle_rooms(&self) {
        self.rooms
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
    }

    fn send_global(&self, event: OutboundEvent) {
        // No subscribers is fine.
        let _ = self.global.send(event);
    }

    fn send_scoped(&self, request: &ServiceRequest, event: OutboundEvent) {
        if let Some(spoc_id) = request.spoc_id.as_deref() {
            self.send_room(&Self::spoc_room(spoc_id), event.clone());
        }
        if let Some(team_id) = request.team_id.as_deref() {
            self.send_room(&Self::team_room(team_id), event);
        }
    }

    fn send_room(&self, room: &str, event: OutboundEvent) {
        if let Some(sender) = self.rooms.lock().unwrap().get(room) {
            let _ = sender.send(event);
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_request(request: &ServiceRequest) -> Option<serde_json::Value> {
    match serde_json::to_value(request) {
        Ok(doc) => Some(doc),
        Err(err) => {
            tracing::error!("Failed to serialize request event: {err}");
            None
        }
    }
}
