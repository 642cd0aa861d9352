//! # Core Entities
//!
//! Identifiers, case kinds, case statuses and the people/users that cases
//! refer to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ParseError;

/// Wall-clock instant used for every persisted timestamp.
pub type Timestamp = DateTime<Utc>;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| ParseError::InvalidId(s.to_string()))
            }
        }
    };
}

define_id!(
    /// Identity of a case (unique within its kind table).
    CaseId
);
define_id!(
    /// Identity of a person record (requester, handler).
    PersonId
);
define_id!(
    /// Identity of a login user.
    UserId
);
define_id!(
    /// Identity of an inbox notification.
    NotificationId
);
define_id!(
    /// Identity of an evaluation config.
    ConfigId
);
define_id!(
    /// Identity of a reference entity owned outside this core
    /// (counterparty, deployment type, warranty type, ...).
    RefId
);

// =============================================================================
// CASE KIND
// =============================================================================

/// The seven parallel case kinds.
///
/// Kinds are disjoint but structurally parallel: each has its own table,
/// its own status labels and its own kind-specific references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    Internal,
    Deployment,
    Maintenance,
    Warranty,
    Delivery,
    Receiving,
    Incident,
}

impl CaseKind {
    /// Every kind, in display order.
    pub const ALL: [CaseKind; 7] = [
        CaseKind::Internal,
        CaseKind::Deployment,
        CaseKind::Maintenance,
        CaseKind::Warranty,
        CaseKind::Delivery,
        CaseKind::Receiving,
        CaseKind::Incident,
    ];

    /// URL / storage slug.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Deployment => "deployment",
            Self::Maintenance => "maintenance",
            Self::Warranty => "warranty",
            Self::Delivery => "delivery",
            Self::Receiving => "receiving",
            Self::Incident => "incident",
        }
    }

    /// Human readable label used in notices and chat messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Internal => "Internal case",
            Self::Deployment => "Deployment case",
            Self::Maintenance => "Maintenance case",
            Self::Warranty => "Warranty case",
            Self::Delivery => "Delivery case",
            Self::Receiving => "Receiving case",
            Self::Incident => "Incident case",
        }
    }

    /// Display label for a status in this kind's vocabulary.
    ///
    /// Semantics are identical across kinds; only the wording differs.
    #[must_use]
    pub const fn status_label(&self, status: CaseStatus) -> &'static str {
        match (self, status) {
            (_, CaseStatus::Cancelled) => "Cancelled",
            (Self::Delivery, CaseStatus::Received) => "Awaiting dispatch",
            (Self::Delivery, CaseStatus::InProgress) => "Out for delivery",
            (Self::Delivery, CaseStatus::Completed) => "Delivered",
            (Self::Receiving, CaseStatus::Received) => "Awaiting goods",
            (Self::Receiving, CaseStatus::InProgress) => "Inspecting",
            (Self::Receiving, CaseStatus::Completed) => "Received in full",
            (Self::Deployment, CaseStatus::InProgress) => "Deploying",
            (Self::Deployment, CaseStatus::Completed) => "Deployed",
            (Self::Incident, CaseStatus::Received) => "Reported",
            (Self::Incident, CaseStatus::Completed) => "Resolved",
            (_, CaseStatus::Received) => "Received",
            (_, CaseStatus::InProgress) => "In progress",
            (_, CaseStatus::Completed) => "Completed",
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CaseKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownKind(s.to_string()))
    }
}

// =============================================================================
// CASE STATUS
// =============================================================================

/// Case status state machine.
///
/// ```text
/// RECEIVED ──→ IN_PROGRESS ──→ COMPLETED (terminal, endDate set)
///    │              │
///    └──────────────┴────────→ CANCELLED (terminal)
/// ```
///
/// Transitions are monotonic; nothing leaves a terminal status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    #[default]
    Received,
    InProgress,
    Completed,
    Cancelled,
}

impl CaseStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [CaseStatus; 4] = [
        CaseStatus::Received,
        CaseStatus::InProgress,
        CaseStatus::Completed,
        CaseStatus::Cancelled,
    ];

    /// COMPLETED and CANCELLED accept no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Received => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
            Self::Cancelled => 3,
        }
    }

    /// Whether `self → target` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(&self, target: CaseStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match target {
            Self::Cancelled => true,
            _ => target.rank() > self.rank(),
        }
    }

    /// Wire name, e.g. `IN_PROGRESS`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

// =============================================================================
// EVALUATION AXES
// =============================================================================

/// Who produced an assessment. The two vocabularies are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Perspective {
    /// Submitter's self-assessment.
    User,
    /// Reviewer's independent assessment.
    Admin,
}

impl Perspective {
    pub const ALL: [Perspective; 2] = [Perspective::User, Perspective::Admin];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Criteria this perspective scores. FORM is a submitter-only criterion.
    #[must_use]
    pub fn criteria(&self) -> &'static [Criterion] {
        match self {
            Self::User => &Criterion::ALL,
            Self::Admin => &Criterion::CORE,
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Perspective {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownPerspective(s.to_string()))
    }
}

/// A scored assessment criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criterion {
    Difficulty,
    Time,
    Impact,
    Urgency,
    Form,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Difficulty,
        Criterion::Time,
        Criterion::Impact,
        Criterion::Urgency,
        Criterion::Form,
    ];

    /// The four criteria every perspective scores.
    pub const CORE: [Criterion; 4] = [
        Criterion::Difficulty,
        Criterion::Time,
        Criterion::Impact,
        Criterion::Urgency,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Difficulty => "DIFFICULTY",
            Self::Time => "TIME",
            Self::Impact => "IMPACT",
            Self::Urgency => "URGENCY",
            Self::Form => "FORM",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownCriterion(s.to_string()))
    }
}

/// Built-in point scale for a (perspective, criterion) pair, used when the
/// catalog holds no active config for it.
///
/// USER: 1..=5 (FORM 2..=4). ADMIN: 1..=6 (TIME 1..=7). ADMIN has no FORM.
#[must_use]
pub fn default_scale(perspective: Perspective, criterion: Criterion) -> Option<(u32, u32)> {
    match (perspective, criterion) {
        (Perspective::User, Criterion::Form) => Some((2, 4)),
        (Perspective::User, _) => Some((1, 5)),
        (Perspective::Admin, Criterion::Form) => None,
        (Perspective::Admin, Criterion::Time) => Some((1, 7)),
        (Perspective::Admin, _) => Some((1, 6)),
    }
}

// =============================================================================
// PEOPLE AND USERS
// =============================================================================

/// Login role. Anything above `User` is an elevated tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Elevated roles receive case-created notices.
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            other => Err(ParseError::UnknownRole(other.to_string())),
        }
    }
}

/// A login identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
}

/// The authenticated caller of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
}

/// A person record (requester or handler of cases).
///
/// `linked_user` is the login identity of this person, when one exists.
/// Notices addressed to a person go to that user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub full_name: String,
    #[serde(default)]
    pub linked_user: Option<UserId>,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Maximum page size accepted by list operations.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Default page size.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    /// Build a page request, clamping to `page >= 1` and `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Number of items to skip.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page as usize).saturating_sub(1) * self.limit as usize
    }

    /// Slice an already ordered collection.
    #[must_use]
    pub fn apply<T>(&self, items: Vec<T>) -> Paged<T> {
        let total = items.len();
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect();
        Paged {
            items,
            total,
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// One page of results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}
