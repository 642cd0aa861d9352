//! Driven Ports (SPI - Outbound Dependencies)

use async_trait::async_trait;

use crate::domain::ChatMessage;
use crate::error::ChannelResult;

/// One outbound call to the chat API.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &ChatMessage) -> ChannelResult<()>;
}
