use serde::{Deserialize, Serialize};

use crate::queue::Snapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    Join { name: String },
    Leave { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    Error {
        message: String,
    },
    // Sent once on connect and again after every change to the room
    QueueUpdate {
        room: String,
        version: u64,
        members: Vec<String>,
    },
    Ack {
        changed: bool,
    },
}

impl From<Snapshot> for ServerMessage {
    fn from(snapshot: Snapshot) -> Self {
        ServerMessage::QueueUpdate {
            room: snapshot.room,
            version: snapshot.version,
            members: snapshot.members,
        }
    }
}
