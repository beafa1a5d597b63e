// src/application/ports/log.rs
use crate::application::error::{PublishError, ReadError};
use async_trait::async_trait;

/// One record pulled from the ordered log, detached from the client's buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<Vec<u8>>,
    pub payload: Vec<u8>,
}

#[async_trait]
pub trait LogReader: Send + Sync {
    /// Wait for the next message assigned to this consumer group. Callers
    /// race this against their own cancellation; dropping the future must
    /// not lose a message.
    async fn next(&self) -> Result<LogMessage, ReadError>;

    /// Mark `message` as owned by the caller so its position can be
    /// committed. Unacknowledged messages are redelivered after a restart.
    async fn acknowledge(&self, message: &LogMessage) -> Result<(), ReadError>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, key: &str, payload: &[u8]) -> Result<(), PublishError>;
}
