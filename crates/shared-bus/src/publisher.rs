//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{CaseEvent, EventFilter};
use crate::subscriber::Subscription;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Trait for publishing events to the bus.
///
/// Publishing never fails from the producer's point of view: an event with
/// no subscriber is dropped and logged.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that queued the event.
    async fn publish(&self, event: CaseEvent) -> usize;
}

/// Queue end of one subscription.
struct SubscriberQueue {
    filter: EventFilter,
    sender: mpsc::UnboundedSender<CaseEvent>,
}

/// In-memory implementation of the event bus.
///
/// Every subscription owns an unbounded `tokio::sync::mpsc` queue and the
/// filter is applied on publish, so a slow consumer only grows its own
/// backlog and never loses events. Queues whose receiver was dropped are
/// pruned on the next publish.
pub struct InMemoryEventBus {
    subscribers: Mutex<Vec<SubscriberQueue>>,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        debug!(topics = ?filter.topics, kinds = ?filter.kinds, "New subscription created");
        self.subscribers.lock().push(SubscriberQueue {
            filter: filter.clone(),
            sender,
        });
        Subscription::new(receiver, filter)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .iter()
            .filter(|queue| !queue.sender.is_closed())
            .count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: CaseEvent) -> usize {
        let topic = event.topic();
        let name = event.name();
        let case_id = event.case().case_id;

        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|queue| !queue.sender.is_closed());

        let mut delivered = 0;
        for queue in subscribers.iter().filter(|queue| queue.filter.matches(&event)) {
            // A closed receiver here raced with the prune above.
            if queue.sender.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        drop(subscribers);

        if delivered == 0 {
            warn!(topic = ?topic, event = name, %case_id, "Event dropped (no receivers)");
        } else {
            debug!(
                topic = ?topic,
                event = name,
                %case_id,
                receivers = delivered,
                "Event published"
            );
        }
        delivered
    }
}
