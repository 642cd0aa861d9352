//! Notification Fan-out Dispatcher
//!
//! ## Delivery order
//!
//! 1. Resolve the recipient set for the event.
//! 2. Append one notice per recipient. Each append is independent: a failed
//!    write is logged and counted, and the loop moves on.
//! 3. Hand the event to the external channel once, after all appends.

use case_telemetry::{NOTIFICATIONS_DELIVERED, NOTIFICATIONS_FAILED};
use cw_03_notification_inbox::{InboxError, NotificationInbox};
use shared_bus::CaseEvent;
use shared_types::{PersonDirectory, PersonId, UserDirectory, UserId};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{render_notice, DispatchReport, SkipReason};
use crate::error::DispatchResult;
use crate::ports::{ExternalChannel, NotificationDispatch};

pub struct Dispatcher {
    inbox: Arc<dyn NotificationInbox>,
    persons: Arc<dyn PersonDirectory>,
    users: Arc<dyn UserDirectory>,
    channel: Arc<dyn ExternalChannel>,
}

impl Dispatcher {
    pub fn new(
        inbox: Arc<dyn NotificationInbox>,
        persons: Arc<dyn PersonDirectory>,
        users: Arc<dyn UserDirectory>,
        channel: Arc<dyn ExternalChannel>,
    ) -> Self {
        Self {
            inbox,
            persons,
            users,
            channel,
        }
    }

    fn linked_user(&self, person: PersonId) -> DispatchResult<Option<UserId>> {
        Ok(self
            .persons
            .find_person_by_id(person)?
            .and_then(|p| p.linked_user))
    }

    /// Users who receive an inbox notice for `event`.
    ///
    /// - created: every elevated user
    /// - transitioned: requester and handler, minus the actor
    /// - assigned / stale: the handler
    pub fn resolve_recipients(&self, event: &CaseEvent) -> DispatchResult<Vec<UserId>> {
        let case = event.case();
        let recipients = match event {
            CaseEvent::CaseCreated { .. } => self
                .users
                .elevated_users()?
                .into_iter()
                .map(|u| u.id)
                .collect(),
            CaseEvent::CaseTransitioned { actor, .. } => {
                let people = std::iter::once(case.requester.id)
                    .chain(case.handler.as_ref().map(|h| h.id));
                let mut recipients = Vec::new();
                for person in people {
                    if let Some(user) = self.linked_user(person)? {
                        if user != *actor && !recipients.contains(&user) {
                            recipients.push(user);
                        }
                    }
                }
                recipients
            }
            CaseEvent::CaseAssigned { .. } | CaseEvent::StaleCaseDetected { .. } => {
                match &case.handler {
                    Some(handler) => self.linked_user(handler.id)?.into_iter().collect(),
                    None => Vec::new(),
                }
            }
        };
        Ok(recipients)
    }
}

impl NotificationDispatch for Dispatcher {
    fn dispatch(&self, event: &CaseEvent) -> DispatchReport {
        let case = event.case();
        let is_escalation = matches!(event, CaseEvent::StaleCaseDetected { .. });

        if is_escalation && case.handler.is_none() {
            debug!(case_id = %case.case_id, "Stale case has no handler, skipping");
            return DispatchReport::skipped(event.name(), case.case_id, SkipReason::NoHandler);
        }

        let recipients = match self.resolve_recipients(event) {
            Ok(recipients) => recipients,
            Err(e) => {
                NOTIFICATIONS_FAILED.inc();
                error!(
                    event = event.name(),
                    case_id = %case.case_id,
                    error = %e,
                    "Could not resolve notification recipients"
                );
                let mut report = DispatchReport::skipped(
                    event.name(),
                    case.case_id,
                    SkipReason::ResolutionFailed,
                );
                if !is_escalation {
                    self.channel.submit(event);
                    report.forwarded = true;
                }
                return report;
            }
        };

        if is_escalation && recipients.is_empty() {
            debug!(case_id = %case.case_id, "Handler has no linked identity, skipping escalation");
            return DispatchReport::skipped(
                event.name(),
                case.case_id,
                SkipReason::NoLinkedIdentity,
            );
        }

        let notice = render_notice(event);
        let mut report = DispatchReport::new(event.name(), case.case_id);

        for recipient in recipients {
            match self.inbox.append(recipient, notice.clone()) {
                Ok(_) => {
                    NOTIFICATIONS_DELIVERED
                        .with_label_values(&[notice.notice_type.as_str()])
                        .inc();
                    report.delivered.push(recipient);
                }
                Err(InboxError::Duplicate { .. }) => {
                    debug!(
                        recipient = %recipient,
                        case_id = %case.case_id,
                        "Escalation already delivered"
                    );
                    report.duplicates.push(recipient);
                }
                Err(e) => {
                    NOTIFICATIONS_FAILED.inc();
                    warn!(
                        event = event.name(),
                        case_id = %case.case_id,
                        recipient = %recipient,
                        error = %e,
                        "Inbox append failed"
                    );
                    report.failed.push(recipient);
                }
            }
        }

        // A repeated escalation is not announced again.
        if !is_escalation || !report.delivered.is_empty() {
            self.channel.submit(event);
            report.forwarded = true;
        }

        info!(
            event = event.name(),
            case_id = %case.case_id,
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            duplicates = report.duplicates.len(),
            "Event dispatched"
        );
        report
    }
}
