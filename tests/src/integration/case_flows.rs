//! # Case Flows
//!
//! Status machine and assessment rules exercised through the wired
//! lifecycle service, with the evaluation catalog as the score source.

use chrono::Duration;
use cw_01_case_lifecycle::{AssessmentScores, CaseLifecycleApi, LifecycleError};
use cw_02_evaluation_catalog::{EvaluationCatalogApi, OptionInput};
use shared_types::{CaseKind, CaseStatus, Criterion, ErrorKind, Perspective};

use super::fixtures::World;

fn scores(difficulty: i64, time: i64, impact: i64, urgency: i64) -> AssessmentScores {
    AssessmentScores {
        difficulty,
        time,
        impact,
        urgency,
        form: None,
    }
}

// =============================================================================
// STATUS MACHINE
// =============================================================================

#[tokio::test]
async fn test_internal_case_walkthrough() {
    let w = World::new();
    let start = w.clock_now() - Duration::hours(1);
    let case = w
        .open_case(CaseKind::Internal, w.handler, Duration::hours(1))
        .await;
    assert_eq!(case.status, CaseStatus::Received);
    assert_eq!(case.start_date, start);
    assert!(case.end_date.is_none());

    let cases = &w.container.cases;
    let actor = w.admin_actor();

    let case = cases
        .transition_status(actor, CaseKind::Internal, case.id, CaseStatus::InProgress, case.version)
        .await
        .unwrap();
    assert_eq!(case.status, CaseStatus::InProgress);
    assert!(case.end_date.is_none());

    w.clock.advance(Duration::hours(3));
    let case = cases
        .transition_status(actor, CaseKind::Internal, case.id, CaseStatus::Completed, case.version)
        .await
        .unwrap();
    assert_eq!(case.status, CaseStatus::Completed);
    assert_eq!(case.end_date, Some(w.clock_now()));

    let err = cases
        .transition_status(actor, CaseKind::Internal, case.id, CaseStatus::InProgress, case.version)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let stored = cases.get_case(CaseKind::Internal, case.id).await.unwrap();
    assert_eq!(stored.status, CaseStatus::Completed);
    assert_eq!(stored.end_date, Some(w.clock_now()));
}

#[tokio::test]
async fn test_completed_always_carries_end_date() {
    let w = World::new();
    let cases = &w.container.cases;
    let actor = w.admin_actor();

    for kind in CaseKind::ALL {
        let case = w.open_case(kind, w.handler, Duration::hours(2)).await;
        let done = cases
            .transition_status(actor, kind, case.id, CaseStatus::Completed, case.version)
            .await
            .unwrap();
        assert!(done.end_date.is_some(), "{kind} completed without end date");
    }

    for kind in CaseKind::ALL {
        let page = cases
            .list_cases(kind, None, shared_types::Page::default())
            .await
            .unwrap();
        for case in page.items {
            if case.status == CaseStatus::Completed {
                assert!(case.end_date.is_some());
            }
        }
    }
}

#[tokio::test]
async fn test_terminal_states_reject_every_transition() {
    let w = World::new();
    let cases = &w.container.cases;
    let actor = w.admin_actor();
    let targets = [
        CaseStatus::Received,
        CaseStatus::InProgress,
        CaseStatus::Completed,
        CaseStatus::Cancelled,
    ];

    for terminal in [CaseStatus::Completed, CaseStatus::Cancelled] {
        let case = w
            .open_case(CaseKind::Maintenance, w.handler, Duration::hours(1))
            .await;
        let closed = cases
            .transition_status(actor, CaseKind::Maintenance, case.id, terminal, case.version)
            .await
            .unwrap();

        for target in targets {
            let err = cases
                .transition_status(actor, CaseKind::Maintenance, closed.id, target, closed.version)
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    LifecycleError::InvalidTransition { .. } | LifecycleError::AlreadyCompleted
                ),
                "{terminal} -> {target}: {err}"
            );
            assert_eq!(err.kind(), ErrorKind::Conflict);
        }

        let stored = cases.get_case(CaseKind::Maintenance, closed.id).await.unwrap();
        assert_eq!(stored.status, terminal);
        assert_eq!(stored.version, closed.version);
    }
}

#[tokio::test]
async fn test_closed_case_cannot_be_reassigned() {
    let w = World::new();
    let cases = &w.container.cases;
    let actor = w.admin_actor();
    let case = w
        .open_case(CaseKind::Delivery, w.handler, Duration::hours(1))
        .await;
    let case = cases
        .transition_status(actor, CaseKind::Delivery, case.id, CaseStatus::Cancelled, case.version)
        .await
        .unwrap();

    let err = cases
        .assign_handler(actor, CaseKind::Delivery, case.id, w.floater, case.version)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::CaseClosed { .. }));
}

#[tokio::test]
async fn test_concurrent_writers_one_wins() {
    let w = World::new();
    let cases = &w.container.cases;
    let actor = w.admin_actor();
    let case = w
        .open_case(CaseKind::Receiving, w.handler, Duration::hours(1))
        .await;

    let first = cases
        .transition_status(
            actor,
            CaseKind::Receiving,
            case.id,
            CaseStatus::InProgress,
            case.version,
        )
        .await;
    let second = cases
        .transition_status(actor, CaseKind::Receiving, case.id, CaseStatus::Cancelled, case.version)
        .await;

    assert!(first.is_ok());
    assert!(matches!(
        second,
        Err(LifecycleError::VersionMismatch { expected: 1, actual: 2 })
    ));
}

// =============================================================================
// ASSESSMENTS AGAINST THE CATALOG
// =============================================================================

#[tokio::test]
async fn test_out_of_range_assessment_leaves_prior_scores() {
    let w = World::new();
    w.container.catalog.seed_defaults().unwrap();
    let cases = &w.container.cases;
    let case = w
        .open_case(CaseKind::Warranty, w.handler, Duration::hours(1))
        .await;

    let recorded = cases
        .record_assessment(
            w.staff_actor(),
            CaseKind::Warranty,
            case.id,
            Perspective::User,
            scores(2, 3, 4, 5),
        )
        .await
        .unwrap();
    let prior = recorded.user_assessment.clone().unwrap();

    w.clock.advance(Duration::minutes(10));
    let err = cases
        .record_assessment(
            w.staff_actor(),
            CaseKind::Warranty,
            case.id,
            Perspective::User,
            scores(9, 1, 1, 1),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let stored = cases.get_case(CaseKind::Warranty, case.id).await.unwrap();
    assert_eq!(stored.user_assessment, Some(prior));
    assert_eq!(stored.version, recorded.version);
    assert!(stored.admin_assessment.is_none());
}

#[tokio::test]
async fn test_assessment_range_follows_catalog() {
    let w = World::new();
    let cases = &w.container.cases;
    let case = w
        .open_case(CaseKind::Incident, w.handler, Duration::hours(1))
        .await;

    // Built-in admin impact scale runs to 6.
    cases
        .record_assessment(
            w.admin_actor(),
            CaseKind::Incident,
            case.id,
            Perspective::Admin,
            scores(1, 1, 6, 1),
        )
        .await
        .unwrap();

    w.container
        .catalog
        .upsert_options(
            Perspective::Admin,
            Criterion::Impact,
            vec![
                OptionInput::new("Thap", 1, 0),
                OptionInput::new("Trung binh", 2, 1),
                OptionInput::new("Cao", 3, 2),
            ],
        )
        .unwrap();

    let err = cases
        .record_assessment(
            w.admin_actor(),
            CaseKind::Incident,
            case.id,
            Perspective::Admin,
            scores(1, 1, 6, 1),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::ScoreOutOfRange {
            criterion: Criterion::Impact,
            max: 3,
            ..
        }
    ));

    let stored = cases.get_case(CaseKind::Incident, case.id).await.unwrap();
    assert_eq!(stored.admin_assessment.unwrap().scores.impact, 6);
}
