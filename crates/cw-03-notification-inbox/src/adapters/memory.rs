//! In-memory notification store, one mailbox per recipient.

use parking_lot::RwLock;
use shared_types::{NotificationId, UserId};
use std::collections::HashMap;

use crate::domain::{NoticeType, Notification};
use crate::error::{InboxError, InboxResult};
use crate::ports::NotificationStore;

#[derive(Default)]
pub struct InMemoryNotificationStore {
    /// Mailboxes in insertion order.
    mailboxes: RwLock<HashMap<UserId, Vec<Notification>>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total notices across all recipients.
    pub fn len(&self) -> usize {
        self.mailboxes.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationStore for InMemoryNotificationStore {
    fn insert(&self, notification: Notification) -> InboxResult<()> {
        let mut mailboxes = self.mailboxes.write();
        let mailbox = mailboxes.entry(notification.recipient_id).or_default();

        if notification.notice_type == NoticeType::StaleEscalation {
            if let Some(case_id) = notification.case_id {
                if mailbox.iter().any(|n| n.is_escalation_for(case_id)) {
                    return Err(InboxError::Duplicate {
                        recipient: notification.recipient_id,
                        case_id,
                    });
                }
            }
        }

        mailbox.push(notification);
        Ok(())
    }

    fn for_recipient(&self, recipient: UserId) -> InboxResult<Vec<Notification>> {
        Ok(self
            .mailboxes
            .read()
            .get(&recipient)
            .map(|mailbox| mailbox.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    fn mark_read(&self, recipient: UserId, id: NotificationId) -> InboxResult<Notification> {
        let mut mailboxes = self.mailboxes.write();
        let notification = mailboxes
            .get_mut(&recipient)
            .and_then(|mailbox| mailbox.iter_mut().find(|n| n.id == id))
            .ok_or(InboxError::NotFound(id))?;
        notification.is_read = true;
        Ok(notification.clone())
    }

    fn mark_all_read(&self, recipient: UserId) -> InboxResult<usize> {
        let mut mailboxes = self.mailboxes.write();
        let Some(mailbox) = mailboxes.get_mut(&recipient) else {
            return Ok(0);
        };
        let mut changed = 0;
        for notification in mailbox.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }

    fn remove(&self, recipient: UserId, id: NotificationId) -> InboxResult<Notification> {
        let mut mailboxes = self.mailboxes.write();
        let mailbox = mailboxes
            .get_mut(&recipient)
            .ok_or(InboxError::NotFound(id))?;
        let index = mailbox
            .iter()
            .position(|n| n.id == id)
            .ok_or(InboxError::NotFound(id))?;
        Ok(mailbox.remove(index))
    }
}
