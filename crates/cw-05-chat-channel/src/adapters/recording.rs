//! In-process transport that keeps sent messages.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

use crate::domain::ChatMessage;
use crate::error::{ChannelError, ChannelResult};
use crate::ports::ChatTransport;

#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<ChatMessage>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Every send waits `delay` before succeeding.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ChatMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, message: &ChatMessage) -> ChannelResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ChannelError::Request("connection refused".into()));
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}
