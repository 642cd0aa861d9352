//! # cw-03-notification-inbox
//!
//! Per-recipient mailbox of structured notices. All operations are scoped
//! to one recipient; there is no cross-recipient visibility.
//!
//! Stale escalations are unique per (recipient, case): a second append
//! fails with `InboxError::Duplicate`.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::InMemoryNotificationStore;
pub use domain::{escalation_marker, NewNotice, NoticeType, Notification, ReadFilter};
pub use error::{InboxError, InboxResult};
pub use ports::{NotificationInbox, NotificationStore};
pub use service::InboxService;
