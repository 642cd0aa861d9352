//! Error types for the Case Lifecycle subsystem

use shared_types::{CaseId, CaseKind, CaseStatus, Criterion, DirectoryError, ErrorKind, Perspective};
use thiserror::Error;

/// Case lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A required field is missing or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// End date does not come after the start date
    #[error("End date must be after start date")]
    InvalidDateRange,

    /// Body kind-specific details belong to another kind
    #[error("Details for {found} submitted to a {expected} case")]
    KindMismatch { expected: CaseKind, found: CaseKind },

    /// Handler id does not name a known person
    #[error("Unknown handler: {0}")]
    UnknownHandler(String),

    /// Caller has no linked person and no fallback requester is configured
    #[error("Caller has no linked person record to act as requester")]
    RequesterUnresolved,

    /// Score outside the active vocabulary for that criterion
    #[error("{perspective} {criterion} score {value} outside {min}..={max}")]
    ScoreOutOfRange {
        perspective: Perspective,
        criterion: Criterion,
        value: i64,
        min: u32,
        max: u32,
    },

    /// Criterion not scored from this perspective
    #[error("{criterion} is not scored from the {perspective} perspective")]
    CriterionNotAllowed {
        perspective: Perspective,
        criterion: Criterion,
    },

    /// Case not found in its kind table
    #[error("{kind} case not found: {id}")]
    NotFound { kind: CaseKind, id: CaseId },

    /// Target COMPLETED on an already COMPLETED case
    #[error("Case is already completed")]
    AlreadyCompleted,

    /// Transition not permitted by the status machine
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: CaseStatus, to: CaseStatus },

    /// Terminal cases accept no handler change
    #[error("Case is {status} and can no longer be reassigned")]
    CaseClosed { status: CaseStatus },

    /// Caller observed an older version of the case
    #[error("Stale version: expected {expected}, case is at {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    /// Primary storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Person directory failure
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Score vocabulary lookup failure
    #[error("Score range lookup failed: {0}")]
    ScoreSource(String),
}

impl LifecycleError {
    /// Caller-facing classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::InvalidDateRange
            | Self::KindMismatch { .. }
            | Self::UnknownHandler(_)
            | Self::RequesterUnresolved
            | Self::ScoreOutOfRange { .. }
            | Self::CriterionNotAllowed { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyCompleted
            | Self::InvalidTransition { .. }
            | Self::CaseClosed { .. }
            | Self::VersionMismatch { .. } => ErrorKind::Conflict,
            Self::Storage(_) | Self::Directory(_) | Self::ScoreSource(_) => ErrorKind::Fatal,
        }
    }
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
