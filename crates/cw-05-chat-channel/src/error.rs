//! Error types for the chat channel
//!
//! Nothing here reaches the caller of a case operation; the outbox worker
//! logs and counts every failure.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("Chat channel misconfigured: {0}")]
    Config(String),

    #[error("Chat request failed: {0}")]
    Request(String),

    #[error("Chat API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Chat API error: {0}")]
    Api(String),

    #[error("Chat send timed out after {0:?}")]
    Timeout(Duration),

    /// The outbox is at capacity; the message was dropped.
    #[error("Chat outbox full")]
    QueueFull,

    /// The outbox worker has stopped.
    #[error("Chat outbox closed")]
    Closed,
}

pub type ChannelResult<T> = Result<T, ChannelError>;
