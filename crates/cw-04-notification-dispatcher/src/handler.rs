//! Bus worker: feeds lifecycle events from the shared bus into the
//! dispatcher, off the request path.

use shared_bus::Subscription;
use std::sync::Arc;
use tracing::{debug, info};

use crate::ports::NotificationDispatch;

pub struct DispatchHandler {
    dispatcher: Arc<dyn NotificationDispatch>,
    subscription: Subscription,
}

impl DispatchHandler {
    pub fn new(dispatcher: Arc<dyn NotificationDispatch>, subscription: Subscription) -> Self {
        Self {
            dispatcher,
            subscription,
        }
    }

    /// Run until the bus closes. Callers stop it early by dropping the
    /// future (e.g. from a `select!` on a shutdown signal).
    pub async fn run(mut self) {
        info!("Notification dispatch handler started");

        while let Some(event) = self.subscription.recv().await {
            let report = self.dispatcher.dispatch(&event);
            debug!(
                event = report.event,
                case_id = %report.case_id,
                attempted = report.attempted(),
                forwarded = report.forwarded,
                "Dispatch finished"
            );
        }

        info!("Event bus closed, dispatch handler stopping");
    }
}
