//! Error types for the Notification Dispatcher
//!
//! These never leave `dispatch`; they are recorded on the report and in logs.

use cw_03_notification_inbox::InboxError;
use shared_types::DirectoryError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Recipient resolution failed: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Inbox append failed: {0}")]
    Inbox(#[from] InboxError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
