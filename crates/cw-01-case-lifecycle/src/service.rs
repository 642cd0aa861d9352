//! Case Lifecycle Service - Core business logic
//!
//! Validates, persists through the `CaseRepository`, then publishes a
//! `CaseEvent` on the shared bus. Publication is fire-and-forget: the bus
//! never reports failure back, and the caller always gets the persisted case.

use async_trait::async_trait;
use case_telemetry::{CASES_CREATED, CASE_TRANSITIONS};
use shared_bus::{CaseEvent, CaseSummary, EventPublisher, PersonRef};
use shared_types::{
    CaseId, CaseKind, CaseStatus, Clock, CurrentUser, Page, Paged, Person, PersonDirectory,
    PersonId, Perspective,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    apply_assignment, apply_transition, validate_scores, Assessment, AssessmentScores, Case,
    NewCase,
};
use crate::error::{LifecycleError, LifecycleResult};
use crate::ports::{CaseLifecycleApi, CaseRepository, ScoreRangeSource};

/// Who becomes requester when the caller has no linked person record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequesterFallback {
    /// Refuse the request with a validation error.
    #[default]
    Reject,
    /// Use this administrator-configured person.
    Person(PersonId),
    /// Use whichever person the directory lists first. Logged on every use.
    FirstAvailable,
}

/// Lifecycle configuration
#[derive(Clone, Debug, Default)]
pub struct LifecycleConfig {
    pub requester_fallback: RequesterFallback,
}

/// Case Lifecycle Service implementation
pub struct CaseLifecycleService {
    config: LifecycleConfig,
    repository: Arc<dyn CaseRepository>,
    persons: Arc<dyn PersonDirectory>,
    scores: Arc<dyn ScoreRangeSource>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CaseLifecycleService {
    pub fn new(
        config: LifecycleConfig,
        repository: Arc<dyn CaseRepository>,
        persons: Arc<dyn PersonDirectory>,
        scores: Arc<dyn ScoreRangeSource>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            repository,
            persons,
            scores,
            publisher,
            clock,
        }
    }

    fn resolve_requester(&self, actor: &CurrentUser) -> LifecycleResult<Person> {
        if let Some(person) = self.persons.find_person_by_linked_user(actor.id)? {
            return Ok(person);
        }

        match &self.config.requester_fallback {
            RequesterFallback::Reject => Err(LifecycleError::RequesterUnresolved),
            RequesterFallback::Person(id) => self
                .persons
                .find_person_by_id(*id)?
                .ok_or(LifecycleError::RequesterUnresolved),
            RequesterFallback::FirstAvailable => {
                let person = self
                    .persons
                    .find_first_person()?
                    .ok_or(LifecycleError::RequesterUnresolved)?;
                warn!(
                    user = %actor.id,
                    requester = %person.id,
                    "Caller has no linked person; using first available person as requester"
                );
                Ok(person)
            }
        }
    }

    fn check_scores(
        &self,
        perspective: Perspective,
        scores: &AssessmentScores,
    ) -> LifecycleResult<()> {
        validate_scores(perspective, scores, |criterion| {
            self.scores.score_range(perspective, criterion)
        })
    }

    /// Snapshot `case` for an event, resolving participant names.
    pub fn summarize(&self, case: &Case) -> CaseSummary {
        case_summary(case, self.persons.as_ref())
    }

    async fn emit(&self, event: CaseEvent) {
        self.publisher.publish(event).await;
    }
}

/// Snapshot a case for an event. Name lookups are best effort.
pub fn case_summary(case: &Case, persons: &dyn PersonDirectory) -> CaseSummary {
    let lookup = |id: PersonId| PersonRef {
        id,
        name: persons
            .find_person_by_id(id)
            .ok()
            .flatten()
            .map(|p| p.full_name),
    };

    CaseSummary {
        case_id: case.id,
        kind: case.kind,
        title: case.title.clone(),
        description: case.description.clone(),
        status: case.status,
        requester: lookup(case.requester_id),
        handler: case.handler_id.map(lookup),
        counterparty_name: case.counterparty_name.clone(),
        start_date: case.start_date,
        end_date: case.end_date,
        version: case.version,
    }
}

fn person_ref(person: &Person) -> PersonRef {
    PersonRef {
        id: person.id,
        name: Some(person.full_name.clone()),
    }
}

#[async_trait]
impl CaseLifecycleApi for CaseLifecycleService {
    async fn create_case(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        input: NewCase,
    ) -> LifecycleResult<Case> {
        let validated = input.validate(kind)?;
        let requester = self.resolve_requester(&actor)?;
        let handler = self
            .persons
            .find_person_by_id(validated.handler_id)?
            .ok_or_else(|| LifecycleError::UnknownHandler(validated.handler_id.to_string()))?;

        let now = self.clock.now();
        let user_assessment = match validated.user_assessment {
            Some(scores) => {
                self.check_scores(Perspective::User, &scores)?;
                Some(Assessment {
                    scores,
                    assessed_at: now,
                })
            }
            None => None,
        };

        let case = Case {
            id: CaseId::new(),
            kind,
            title: validated.title,
            description: validated.description,
            requester_id: requester.id,
            handler_id: Some(handler.id),
            counterparty_id: validated.counterparty_id,
            counterparty_name: Some(validated.counterparty_name),
            details: validated.details,
            status: CaseStatus::Received,
            start_date: validated.start_date,
            end_date: validated.end_date,
            user_assessment,
            admin_assessment: None,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(case.clone())?;
        CASES_CREATED.with_label_values(&[kind.slug()]).inc();
        info!(case_id = %case.id, kind = %kind, requester = %requester.id, "Case created");

        let mut summary = self.summarize(&case);
        summary.requester = person_ref(&requester);
        summary.handler = Some(person_ref(&handler));
        self.emit(CaseEvent::CaseCreated {
            case: summary,
            actor: actor.id,
            occurred_at: now,
        })
        .await;

        Ok(case)
    }

    async fn transition_status(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        id: CaseId,
        target: CaseStatus,
        expected_version: u64,
    ) -> LifecycleResult<Case> {
        let now = self.clock.now();
        let mut from = CaseStatus::default();
        let case = self
            .repository
            .update(kind, id, Some(expected_version), &mut |case| {
                from = case.status;
                apply_transition(case, target, now)
            })?;

        CASE_TRANSITIONS
            .with_label_values(&[kind.slug(), target.as_str()])
            .inc();
        info!(case_id = %id, kind = %kind, from = %from, to = %target, "Case transitioned");

        self.emit(CaseEvent::CaseTransitioned {
            case: self.summarize(&case),
            from,
            to: target,
            actor: actor.id,
            occurred_at: now,
        })
        .await;

        Ok(case)
    }

    async fn record_assessment(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        id: CaseId,
        perspective: Perspective,
        scores: AssessmentScores,
    ) -> LifecycleResult<Case> {
        self.check_scores(perspective, &scores)?;

        let now = self.clock.now();
        let assessment = Assessment {
            scores,
            assessed_at: now,
        };
        let case = self.repository.update(kind, id, None, &mut |case| {
            match perspective {
                Perspective::User => case.user_assessment = Some(assessment.clone()),
                Perspective::Admin => case.admin_assessment = Some(assessment.clone()),
            }
            case.touch(now);
            Ok(())
        })?;

        info!(
            case_id = %id,
            kind = %kind,
            perspective = %perspective,
            user = %actor.id,
            "Assessment recorded"
        );
        Ok(case)
    }

    async fn assign_handler(
        &self,
        actor: CurrentUser,
        kind: CaseKind,
        id: CaseId,
        handler: PersonId,
        expected_version: u64,
    ) -> LifecycleResult<Case> {
        if self.persons.find_person_by_id(handler)?.is_none() {
            return Err(LifecycleError::UnknownHandler(handler.to_string()));
        }

        let now = self.clock.now();
        let mut previous = None;
        let case = self
            .repository
            .update(kind, id, Some(expected_version), &mut |case| {
                previous = case.handler_id;
                apply_assignment(case, handler, now)
            })?;

        info!(case_id = %id, kind = %kind, handler = %handler, "Case reassigned");

        self.emit(CaseEvent::CaseAssigned {
            case: self.summarize(&case),
            previous_handler: previous,
            actor: actor.id,
            occurred_at: now,
        })
        .await;

        Ok(case)
    }

    async fn get_case(&self, kind: CaseKind, id: CaseId) -> LifecycleResult<Case> {
        self.repository
            .get(kind, id)?
            .ok_or(LifecycleError::NotFound { kind, id })
    }

    async fn list_cases(
        &self,
        kind: CaseKind,
        status: Option<CaseStatus>,
        page: Page,
    ) -> LifecycleResult<Paged<Case>> {
        let cases = self.repository.list(kind, status)?;
        Ok(page.apply(cases))
    }
}
