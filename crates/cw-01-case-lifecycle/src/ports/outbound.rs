//! Driven Ports (SPI - Outbound Dependencies)

use shared_types::{CaseId, CaseKind, CaseStatus, Criterion, Perspective, Timestamp};

use crate::domain::{Case, ScoreRange};
use crate::error::LifecycleResult;

/// Typed storage for the seven case tables.
///
/// Every write is scoped by (kind, id). `update` runs the mutation under the
/// row's write lock so a status and its end date land together.
pub trait CaseRepository: Send + Sync {
    /// Insert a new case into its kind's table.
    fn insert(&self, case: Case) -> LifecycleResult<()>;

    /// Fetch one case.
    fn get(&self, kind: CaseKind, id: CaseId) -> LifecycleResult<Option<Case>>;

    /// Apply `mutate` atomically.
    ///
    /// Fails with `NotFound` for an unknown id and `VersionMismatch` when
    /// `expected_version` is given and differs. If `mutate` fails nothing is
    /// written.
    fn update(
        &self,
        kind: CaseKind,
        id: CaseId,
        expected_version: Option<u64>,
        mutate: &mut dyn FnMut(&mut Case) -> LifecycleResult<()>,
    ) -> LifecycleResult<Case>;

    /// Cases of one kind, newest first, optionally filtered by status.
    fn list(&self, kind: CaseKind, status: Option<CaseStatus>) -> LifecycleResult<Vec<Case>>;

    /// Non-terminal cases with a handler whose start date is before `cutoff`.
    fn open_started_before(&self, kind: CaseKind, cutoff: Timestamp) -> LifecycleResult<Vec<Case>>;
}

/// Active score vocabulary lookup (backed by the evaluation catalog).
pub trait ScoreRangeSource: Send + Sync {
    /// Min/max points of the active options, `None` when no config exists.
    fn score_range(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> LifecycleResult<Option<ScoreRange>>;
}
