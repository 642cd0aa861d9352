//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use shared_types::{
    CaseId, CaseKind, CaseStatus, CurrentUser, Page, Paged, Perspective, PersonId,
};

use crate::domain::{AssessmentScores, Case, NewCase};
use crate::error::LifecycleResult;

/// Primary Case Lifecycle API
///
/// Writes persist first and publish second. Event publication never fails
/// the operation.
#[async_trait]
pub trait CaseLifecycleApi: Send + Sync {
    /// Validate and store a new case in status RECEIVED, then emit
    /// `CaseCreated`.
    async fn create_case(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        input: NewCase,
    ) -> LifecycleResult<Case>;

    /// Move a case to `target`, emitting `CaseTransitioned`.
    ///
    /// `expected_version` is the version the caller last observed.
    async fn transition_status(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        id: CaseId,
        target: CaseStatus,
        expected_version: u64,
    ) -> LifecycleResult<Case>;

    /// Overwrite one perspective's assessment block. Status is untouched.
    async fn record_assessment(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        id: CaseId,
        perspective: Perspective,
        scores: AssessmentScores,
    ) -> LifecycleResult<Case>;

    /// Hand a non-terminal case to another person, emitting `CaseAssigned`.
    async fn assign_handler(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        id: CaseId,
        handler: PersonId,
        expected_version: u64,
    ) -> LifecycleResult<Case>;

    /// Fetch one case.
    async fn get_case(&self, kind: CaseKind, id: CaseId) -> LifecycleResult<Case>;

    /// One page of a kind's cases, newest first.
    async fn list_cases(
        &self,
        kind: CaseKind,
        status: Option<CaseStatus>,
        page: Page,
    ) -> LifecycleResult<Paged<Case>>;
}
