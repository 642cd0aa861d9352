//! Notification Inbox Service

use shared_types::{CaseId, CaseKind, Clock, NotificationId, Page, Paged, UserId};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{escalation_marker, NewNotice, NoticeType, Notification, ReadFilter};
use crate::error::{InboxError, InboxResult};
use crate::ports::{NotificationInbox, NotificationStore};

pub struct InboxService {
    store: Arc<dyn NotificationStore>,
    clock: Arc<dyn Clock>,
}

impl InboxService {
    pub fn new(store: Arc<dyn NotificationStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl NotificationInbox for InboxService {
    fn append(&self, recipient: UserId, notice: NewNotice) -> InboxResult<Notification> {
        if notice.title.trim().is_empty() {
            return Err(InboxError::InvalidNotice("title"));
        }
        if notice.notice_type == NoticeType::StaleEscalation && notice.case_ref.is_none() {
            return Err(InboxError::InvalidNotice("escalation without case"));
        }

        let notification = Notification {
            id: NotificationId::new(),
            recipient_id: recipient,
            title: notice.title,
            message: notice.message,
            notice_type: notice.notice_type,
            case_id: notice.case_ref.map(|(_, id)| id),
            case_kind: notice.case_ref.map(|(kind, _)| kind),
            is_read: false,
            created_at: self.clock.now(),
        };
        self.store.insert(notification.clone())?;

        debug!(
            notification_id = %notification.id,
            recipient = %recipient,
            notice_type = %notification.notice_type,
            "Notice appended"
        );
        Ok(notification)
    }

    fn list_for(
        &self,
        recipient: UserId,
        filter: ReadFilter,
        page: Page,
    ) -> InboxResult<Paged<Notification>> {
        let notices: Vec<_> = self
            .store
            .for_recipient(recipient)?
            .into_iter()
            .filter(|n| filter.matches(n))
            .collect();
        Ok(page.apply(notices))
    }

    fn unread_count(&self, recipient: UserId) -> InboxResult<usize> {
        Ok(self
            .store
            .for_recipient(recipient)?
            .iter()
            .filter(|n| !n.is_read)
            .count())
    }

    fn mark_read(&self, recipient: UserId, id: NotificationId) -> InboxResult<Notification> {
        self.store.mark_read(recipient, id)
    }

    fn mark_all_read(&self, recipient: UserId) -> InboxResult<usize> {
        let changed = self.store.mark_all_read(recipient)?;
        info!(recipient = %recipient, changed, "Marked all notices read");
        Ok(changed)
    }

    fn delete(&self, recipient: UserId, id: NotificationId) -> InboxResult<()> {
        self.store.remove(recipient, id)?;
        Ok(())
    }

    fn has_escalation(
        &self,
        recipient: UserId,
        kind: CaseKind,
        case_id: CaseId,
    ) -> InboxResult<bool> {
        let marker = escalation_marker(kind, case_id);
        Ok(self
            .store
            .for_recipient(recipient)?
            .iter()
            .any(|n| n.notice_type == NoticeType::StaleEscalation && n.title.contains(&marker)))
    }
}
