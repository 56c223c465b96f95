use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Please enter a name to join or leave a queue")]
    InvalidInput,

    #[error("Unknown room: {0}")]
    UnknownRoom(String),
}

pub type Result<T> = std::result::Result<T, QueueError>;
