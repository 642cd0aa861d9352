//! Outcome of one dispatch.

use shared_types::{CaseId, UserId};

/// Why an event produced no inbox writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The case has no handler.
    NoHandler,
    /// The handler has no linked login identity.
    NoLinkedIdentity,
    /// The directory could not be read.
    ResolutionFailed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport {
    pub event: &'static str,
    pub case_id: CaseId,
    pub delivered: Vec<UserId>,
    pub failed: Vec<UserId>,
    /// Escalations the inbox already held.
    pub duplicates: Vec<UserId>,
    pub skipped: Option<SkipReason>,
    /// Whether the event was handed to the external channel.
    pub forwarded: bool,
}

impl DispatchReport {
    pub fn new(event: &'static str, case_id: CaseId) -> Self {
        Self {
            event,
            case_id,
            delivered: Vec::new(),
            failed: Vec::new(),
            duplicates: Vec::new(),
            skipped: None,
            forwarded: false,
        }
    }

    pub fn skipped(event: &'static str, case_id: CaseId, reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::new(event, case_id)
        }
    }

    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len() + self.duplicates.len()
    }
}
