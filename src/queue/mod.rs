pub mod feed;
pub mod registry;
pub mod room_queue;

pub use feed::{Snapshot, Subscription};
pub use registry::{Change, QueueRegistry};
