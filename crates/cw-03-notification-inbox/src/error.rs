//! Error types for the Notification Inbox subsystem

use shared_types::{CaseId, ErrorKind, NotificationId, UserId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InboxError {
    /// Unknown id, or a notice owned by someone else.
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),

    /// An escalation for this recipient and case already exists.
    #[error("Escalation already delivered to {recipient} for case {case_id}")]
    Duplicate { recipient: UserId, case_id: CaseId },

    #[error("Invalid notice: {0}")]
    InvalidNotice(&'static str),

    #[error("Inbox storage error: {0}")]
    Storage(String),
}

impl InboxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Duplicate { .. } => ErrorKind::Conflict,
            Self::InvalidNotice(_) => ErrorKind::Validation,
            Self::Storage(_) => ErrorKind::Fatal,
        }
    }
}

pub type InboxResult<T> = Result<T, InboxError>;
