use futures_util::Stream;
use serde::Serialize;
use tokio::sync::watch;

/// Point-in-time copy of one room's line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub room: String,
    // Bumped on every published update for the room, starts at 0
    pub version: u64,
    pub members: Vec<String>,
}

impl Snapshot {
    pub fn empty(room: &str) -> Self {
        Self {
            room: room.to_string(),
            version: 0,
            members: Vec::new(),
        }
    }
}

/// Live feed of snapshots for one room.
///
/// The first call to [`Subscription::next`] yields the state at subscribe
/// time; every later call waits for the next published update. Updates that
/// arrive while the subscriber is busy collapse into the latest one. Dropping
/// the subscription cancels it. The feed ends when the registry goes away.
pub struct Subscription {
    room: String,
    rx: watch::Receiver<Snapshot>,
    primed: bool,
}

impl Subscription {
    pub(crate) fn new(room: &str, rx: watch::Receiver<Snapshot>) -> Self {
        Self {
            room: room.to_string(),
            rx,
            primed: false,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub async fn next(&mut self) -> Option<Snapshot> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn into_stream(self) -> impl Stream<Item = Snapshot> {
        futures_util::stream::unfold(self, |mut sub| async move {
            sub.next().await.map(|snapshot| (snapshot, sub))
        })
    }
}
