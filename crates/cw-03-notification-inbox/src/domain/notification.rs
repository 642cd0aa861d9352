//! Notification entity and notice types.

use serde::{Deserialize, Serialize};
use shared_types::{CaseId, CaseKind, NotificationId, Timestamp, UserId};
use std::fmt;

/// Notice type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeType {
    CaseCreated,
    CaseUpdated,
    CaseCompleted,
    CaseAssigned,
    SystemAlert,
    /// Long-running case escalation raised by the stale monitor.
    StaleEscalation,
}

impl NoticeType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CaseCreated => "CASE_CREATED",
            Self::CaseUpdated => "CASE_UPDATED",
            Self::CaseCompleted => "CASE_COMPLETED",
            Self::CaseAssigned => "CASE_ASSIGNED",
            Self::SystemAlert => "SYSTEM_ALERT",
            Self::StaleEscalation => "STALE_ESCALATION",
        }
    }
}

impl fmt::Display for NoticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbox entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notice_type: NoticeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_kind: Option<CaseKind>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl Notification {
    /// True for a stale escalation about `case_id`.
    pub fn is_escalation_for(&self, case_id: CaseId) -> bool {
        self.notice_type == NoticeType::StaleEscalation && self.case_id == Some(case_id)
    }
}

/// Notice content handed to `append`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNotice {
    pub title: String,
    pub message: String,
    pub notice_type: NoticeType,
    pub case_ref: Option<(CaseKind, CaseId)>,
}

impl NewNotice {
    pub fn about_case(
        notice_type: NoticeType,
        kind: CaseKind,
        case_id: CaseId,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            notice_type,
            case_ref: Some((kind, case_id)),
        }
    }

    pub fn system(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            notice_type: NoticeType::SystemAlert,
            case_ref: None,
        }
    }
}

/// Listing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl ReadFilter {
    /// Map the `isRead` query parameter.
    pub fn from_is_read(is_read: Option<bool>) -> Self {
        match is_read {
            None => Self::All,
            Some(false) => Self::Unread,
            Some(true) => Self::Read,
        }
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.is_read,
            Self::Read => notification.is_read,
        }
    }
}

/// Stable title marker identifying the escalation for one case.
pub fn escalation_marker(kind: CaseKind, case_id: CaseId) -> String {
    format!("[stale:{}:{}]", kind.slug(), case_id)
}
