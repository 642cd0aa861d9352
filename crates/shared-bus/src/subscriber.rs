//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{CaseEvent, EventFilter};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// A subscription handle for receiving events.
///
/// Only events matching the filter are queued. Dropping the handle closes
/// the queue and the bus forgets it on the next publish.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<CaseEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<CaseEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next queued event.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next matching event
    /// - `None` - The bus was dropped and the queue is drained
    pub async fn recv(&mut self) -> Option<CaseEvent> {
        self.receiver.recv().await
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was queued
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(SubscriptionError::Closed)` - The bus was dropped
    pub fn try_recv(&mut self) -> Result<Option<CaseEvent>, SubscriptionError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SubscriptionError::Closed),
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
