//! Dispatcher → chat outbox adapter.

use cw_04_notification_dispatcher::ExternalChannel;
use cw_05_chat_channel::ChatOutbox;
use shared_bus::CaseEvent;
use std::sync::Arc;

/// Implements the dispatcher's `ExternalChannel` by queueing onto the chat
/// outbox. A full or closed outbox is already logged and counted there.
pub struct OutboxChannel {
    outbox: Arc<ChatOutbox>,
}

impl OutboxChannel {
    pub fn new(outbox: Arc<ChatOutbox>) -> Self {
        Self { outbox }
    }
}

impl ExternalChannel for OutboxChannel {
    fn submit(&self, event: &CaseEvent) {
        let _ = self.outbox.enqueue(event);
    }
}
