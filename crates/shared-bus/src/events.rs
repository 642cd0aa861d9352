//! # Case Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Events are self-describing: they carry a `CaseSummary` snapshot taken at
//! publish time, so consumers (dispatcher, chat renderer) never read back
//! from the case repository.

use serde::{Deserialize, Serialize};
use shared_types::entities::{CaseId, CaseKind, CaseStatus, PersonId, Timestamp, UserId};

/// A person as seen on an event: id plus display name when it resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: PersonId,
    pub name: Option<String>,
}

impl PersonRef {
    /// Name for rendering; falls back to the id.
    #[must_use]
    pub fn display(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Snapshot of a case at the moment an event was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub case_id: CaseId,
    pub kind: CaseKind,
    pub title: String,
    pub description: String,
    pub status: CaseStatus,
    pub requester: PersonRef,
    pub handler: Option<PersonRef>,
    pub counterparty_name: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub version: u64,
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CaseEvent {
    /// A case was created.
    /// Source: Case Lifecycle | Consumer: Dispatcher (elevated users)
    CaseCreated {
        case: CaseSummary,
        actor: UserId,
        occurred_at: Timestamp,
    },

    /// A case moved to a new status.
    /// Source: Case Lifecycle | Consumer: Dispatcher (requester + handler)
    CaseTransitioned {
        case: CaseSummary,
        from: CaseStatus,
        to: CaseStatus,
        actor: UserId,
        occurred_at: Timestamp,
    },

    /// A case got a new handler.
    /// Source: Case Lifecycle | Consumer: Dispatcher (new handler)
    CaseAssigned {
        case: CaseSummary,
        previous_handler: Option<PersonId>,
        actor: UserId,
        occurred_at: Timestamp,
    },

    /// A non-terminal case passed the age threshold.
    /// Source: Stale Monitor | Consumer: Dispatcher (handler)
    StaleCaseDetected {
        case: CaseSummary,
        age_hours: i64,
        occurred_at: Timestamp,
    },
}

impl CaseEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CaseCreated { .. }
            | Self::CaseTransitioned { .. }
            | Self::CaseAssigned { .. } => EventTopic::Lifecycle,
            Self::StaleCaseDetected { .. } => EventTopic::Escalation,
        }
    }

    /// The case this event is about.
    #[must_use]
    pub fn case(&self) -> &CaseSummary {
        match self {
            Self::CaseCreated { case, .. }
            | Self::CaseTransitioned { case, .. }
            | Self::CaseAssigned { case, .. }
            | Self::StaleCaseDetected { case, .. } => case,
        }
    }

    /// The user who caused the event. System events have none.
    #[must_use]
    pub fn actor(&self) -> Option<UserId> {
        match self {
            Self::CaseCreated { actor, .. }
            | Self::CaseTransitioned { actor, .. }
            | Self::CaseAssigned { actor, .. } => Some(*actor),
            Self::StaleCaseDetected { .. } => None,
        }
    }

    #[must_use]
    pub fn occurred_at(&self) -> Timestamp {
        match self {
            Self::CaseCreated { occurred_at, .. }
            | Self::CaseTransitioned { occurred_at, .. }
            | Self::CaseAssigned { occurred_at, .. }
            | Self::StaleCaseDetected { occurred_at, .. } => *occurred_at,
        }
    }

    /// Short name used in logs and metrics labels.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CaseCreated { .. } => "case_created",
            Self::CaseTransitioned { .. } => "case_transitioned",
            Self::CaseAssigned { .. } => "case_assigned",
            Self::StaleCaseDetected { .. } => "stale_case_detected",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Create / transition / assign events from the lifecycle controller.
    Lifecycle,
    /// Stale case escalations.
    Escalation,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Case kinds to include. Empty means all kinds.
    pub kinds: Vec<CaseKind>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            kinds: Vec::new(),
        }
    }

    /// Create a filter for events about specific case kinds.
    #[must_use]
    pub fn for_kinds(kinds: Vec<CaseKind>) -> Self {
        Self {
            topics: Vec::new(),
            kinds,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &CaseEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let kind_match = self.kinds.is_empty() || self.kinds.contains(&event.case().kind);

        topic_match && kind_match
    }
}
