//! Driven Ports (SPI - Outbound Dependencies)

use shared_types::{NotificationId, UserId};

use crate::domain::Notification;
use crate::error::InboxResult;

/// Durable notification storage, partitioned by recipient.
///
/// Every method takes the recipient; a notice owned by someone else is
/// reported as `NotFound`.
pub trait NotificationStore: Send + Sync {
    /// Store a notice. A second stale escalation for the same
    /// (recipient, case) fails with `Duplicate`.
    fn insert(&self, notification: Notification) -> InboxResult<()>;

    /// All notices of a recipient, newest first.
    fn for_recipient(&self, recipient: UserId) -> InboxResult<Vec<Notification>>;

    fn mark_read(&self, recipient: UserId, id: NotificationId) -> InboxResult<Notification>;

    /// Returns how many notices changed.
    fn mark_all_read(&self, recipient: UserId) -> InboxResult<usize>;

    fn remove(&self, recipient: UserId, id: NotificationId) -> InboxResult<Notification>;
}
