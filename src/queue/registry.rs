use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

use crate::error::{QueueError, Result};
use crate::queue::feed::{Snapshot, Subscription};
use crate::queue::room_queue::RoomQueue;

/// Result of a join or leave: whether the line moved, and what it looks like now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub changed: bool,
    pub snapshot: Snapshot,
}

struct RoomState {
    queue: RoomQueue,
    version: u64,
}

impl RoomState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            room: self.queue.room().to_string(),
            version: self.version,
            members: self.queue.snapshot(),
        }
    }

    // Called with the write lock held; watch::Sender never blocks.
    fn publish(&mut self, feed: &watch::Sender<Snapshot>) -> Snapshot {
        self.version += 1;
        let snapshot = self.snapshot();
        tracing::trace!(
            room = self.queue.room(),
            waiting = self.queue.len(),
            version = self.version,
            "Publishing snapshot"
        );
        feed.send_replace(snapshot.clone());
        snapshot
    }
}

struct RoomSlot {
    state: RwLock<RoomState>,
    feed: watch::Sender<Snapshot>,
}

/// Waiting lines for a fixed set of rooms.
///
/// Cloning is cheap and every clone shares the same lines. Each room has its
/// own lock, so traffic in one room never waits on another.
#[derive(Clone)]
pub struct QueueRegistry {
    order: Arc<Vec<String>>,
    rooms: Arc<HashMap<String, RoomSlot>>,
}

impl QueueRegistry {
    pub fn new<I, S>(rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = Vec::new();
        let mut slots = HashMap::new();

        for room in rooms {
            let room = room.into();
            if slots.contains_key(&room) {
                continue;
            }
            let (feed, _) = watch::channel(Snapshot::empty(&room));
            slots.insert(
                room.clone(),
                RoomSlot {
                    state: RwLock::new(RoomState {
                        queue: RoomQueue::new(room.clone()),
                        version: 0,
                    }),
                    feed,
                },
            );
            order.push(room);
        }

        Self {
            order: Arc::new(order),
            rooms: Arc::new(slots),
        }
    }

    pub fn list_rooms(&self) -> &[String] {
        &self.order
    }

    pub async fn join(&self, room: &str, id: &str) -> Result<Change> {
        let id = validate_id(id)?;
        let slot = self.slot(room)?;

        let (changed, snapshot) = {
            let mut state = slot.state.write().await;
            let changed = state.queue.join(id);
            (changed, state.publish(&slot.feed))
        };

        tracing::info!(room, name = id, changed, version = snapshot.version, "Joined queue");
        Ok(Change { changed, snapshot })
    }

    /// Leaving a line you are not in still succeeds and still publishes.
    pub async fn leave(&self, room: &str, id: &str) -> Result<Change> {
        let id = validate_id(id)?;
        let slot = self.slot(room)?;

        let (changed, snapshot) = {
            let mut state = slot.state.write().await;
            let changed = state.queue.leave(id);
            (changed, state.publish(&slot.feed))
        };

        tracing::info!(room, name = id, changed, version = snapshot.version, "Left queue");
        Ok(Change { changed, snapshot })
    }

    pub async fn snapshot(&self, room: &str) -> Result<Snapshot> {
        let slot = self.slot(room)?;
        let state = slot.state.read().await;
        Ok(state.snapshot())
    }

    pub async fn position(&self, room: &str, id: &str) -> Result<Option<usize>> {
        let id = validate_id(id)?;
        let slot = self.slot(room)?;
        let state = slot.state.read().await;
        Ok(state.queue.position(id))
    }

    pub fn subscribe(&self, room: &str) -> Result<Subscription> {
        let slot = self.slot(room)?;
        tracing::debug!(room, subscribers = slot.feed.receiver_count() + 1, "New subscription");
        Ok(Subscription::new(room, slot.feed.subscribe()))
    }

    fn slot(&self, room: &str) -> Result<&RoomSlot> {
        self.rooms
            .get(room)
            .ok_or_else(|| QueueError::UnknownRoom(room.to_string()))
    }
}

fn validate_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(QueueError::InvalidInput);
    }
    Ok(id)
}
