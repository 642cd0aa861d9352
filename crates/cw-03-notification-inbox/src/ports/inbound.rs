//! Driving Ports (API - Inbound)

use shared_types::{CaseId, CaseKind, NotificationId, Page, Paged, UserId};

use crate::domain::{NewNotice, Notification, ReadFilter};
use crate::error::InboxResult;

/// Recipient-scoped inbox operations.
///
/// `append` is the only write path for the dispatcher; every other
/// operation acts on behalf of the recipient.
pub trait NotificationInbox: Send + Sync {
    fn append(&self, recipient: UserId, notice: NewNotice) -> InboxResult<Notification>;

    fn list_for(
        &self,
        recipient: UserId,
        filter: ReadFilter,
        page: Page,
    ) -> InboxResult<Paged<Notification>>;

    fn unread_count(&self, recipient: UserId) -> InboxResult<usize>;

    fn mark_read(&self, recipient: UserId, id: NotificationId) -> InboxResult<Notification>;

    fn mark_all_read(&self, recipient: UserId) -> InboxResult<usize>;

    fn delete(&self, recipient: UserId, id: NotificationId) -> InboxResult<()>;

    /// Whether the recipient already holds the escalation for a case.
    fn has_escalation(
        &self,
        recipient: UserId,
        kind: CaseKind,
        case_id: CaseId,
    ) -> InboxResult<bool>;
}
