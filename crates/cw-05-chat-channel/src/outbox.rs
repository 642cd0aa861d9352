//! Background delivery queue.
//!
//! `ChatOutbox::enqueue` renders the event and hands it to a bounded queue
//! without waiting. `OutboxWorker::run` drains the queue, bounding each send
//! with the configured timeout. Failures end up in logs and metrics only.

use case_telemetry::{CHAT_MESSAGES_FAILED, CHAT_MESSAGES_SENT};
use shared_bus::CaseEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::{render, ChatMessage, ParseMode};
use crate::error::{ChannelError, ChannelResult};
use crate::ports::ChatTransport;

/// Delivery counters
#[derive(Debug, Default)]
pub struct OutboxStats {
    pub queued: AtomicU64,
    pub sent: AtomicU64,
    pub failed: AtomicU64,
    pub dropped: AtomicU64,
}

struct Outgoing {
    event: &'static str,
    message: ChatMessage,
}

/// Producer side, shared by everything that submits events.
pub struct ChatOutbox {
    sender: mpsc::Sender<Outgoing>,
    parse_mode: ParseMode,
    stats: Arc<OutboxStats>,
}

/// Consumer side. Spawn `run` on the runtime.
pub struct OutboxWorker {
    receiver: mpsc::Receiver<Outgoing>,
    transport: Arc<dyn ChatTransport>,
    timeout: Duration,
    stats: Arc<OutboxStats>,
}

impl ChatOutbox {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        parse_mode: ParseMode,
        capacity: usize,
        timeout: Duration,
    ) -> (Self, OutboxWorker) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let stats = Arc::new(OutboxStats::default());
        let outbox = Self {
            sender,
            parse_mode,
            stats: stats.clone(),
        };
        let worker = OutboxWorker {
            receiver,
            transport,
            timeout,
            stats,
        };
        (outbox, worker)
    }

    /// Render and queue an event. Never waits.
    pub fn enqueue(&self, event: &CaseEvent) -> ChannelResult<()> {
        let outgoing = Outgoing {
            event: event.name(),
            message: render(event, self.parse_mode),
        };

        match self.sender.try_send(outgoing) {
            Ok(()) => {
                self.stats.queued.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                CHAT_MESSAGES_FAILED.inc();
                warn!(
                    event = dropped.event,
                    case_id = %event.case().case_id,
                    "Chat outbox full, message dropped"
                );
                Err(ChannelError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(dropped)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                CHAT_MESSAGES_FAILED.inc();
                warn!(event = dropped.event, "Chat outbox closed, message dropped");
                Err(ChannelError::Closed)
            }
        }
    }

    pub fn stats(&self) -> &OutboxStats {
        &self.stats
    }
}

impl OutboxWorker {
    /// Deliver until every `ChatOutbox` handle is dropped.
    pub async fn run(mut self) {
        info!(timeout_ms = self.timeout.as_millis() as u64, "Chat outbox worker started");

        while let Some(outgoing) = self.receiver.recv().await {
            match self.deliver(&outgoing.message).await {
                Ok(()) => {
                    self.stats.sent.fetch_add(1, Ordering::Relaxed);
                    CHAT_MESSAGES_SENT.inc();
                    debug!(event = outgoing.event, "Chat message delivered");
                }
                Err(e) => {
                    self.stats.failed.fetch_add(1, Ordering::Relaxed);
                    CHAT_MESSAGES_FAILED.inc();
                    warn!(event = outgoing.event, error = %e, "Chat delivery failed");
                }
            }
        }

        info!("Chat outbox closed, worker stopping");
    }

    async fn deliver(&self, message: &ChatMessage) -> ChannelResult<()> {
        tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .map_err(|_| ChannelError::Timeout(self.timeout))?
    }

    pub fn stats(&self) -> Arc<OutboxStats> {
        self.stats.clone()
    }
}
