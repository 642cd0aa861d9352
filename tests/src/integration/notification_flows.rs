//! # Notification Flows
//!
//! Lifecycle events fanned out by the dispatcher, and stale escalations
//! raised by the monitor, landing in per-user inboxes.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use cw_01_case_lifecycle::CaseLifecycleApi;
use cw_03_notification_inbox::{
    InboxError, InboxResult, InboxService, InMemoryNotificationStore, NewNotice, NoticeType,
    Notification, NotificationInbox, ReadFilter,
};
use cw_04_notification_dispatcher::{Dispatcher, NotificationDispatch, RecordingChannel};
use shared_bus::{CaseEvent, Subscription};
use shared_types::{
    CaseId, CaseKind, CaseStatus, Clock, CurrentUser, NotificationId, Page, Paged, Role, UserId,
};
use tokio::time::timeout;

use super::fixtures::{new_case, World};

async fn next_event(sub: &mut Subscription) -> CaseEvent {
    timeout(StdDuration::from_millis(200), sub.recv())
        .await
        .expect("timeout waiting for event")
        .expect("bus closed")
}

fn inbox_of(inbox: &dyn NotificationInbox, user: UserId) -> Vec<Notification> {
    inbox
        .list_for(user, ReadFilter::All, Page::new(1, 100))
        .unwrap()
        .items
}

/// Inbox that rejects writes for one recipient.
struct FailingInbox {
    inner: InboxService,
    broken: UserId,
}

impl NotificationInbox for FailingInbox {
    fn append(&self, recipient: UserId, notice: NewNotice) -> InboxResult<Notification> {
        if recipient == self.broken {
            return Err(InboxError::Storage("connection reset".into()));
        }
        self.inner.append(recipient, notice)
    }
    fn list_for(&self, r: UserId, f: ReadFilter, p: Page) -> InboxResult<Paged<Notification>> {
        self.inner.list_for(r, f, p)
    }
    fn unread_count(&self, r: UserId) -> InboxResult<usize> {
        self.inner.unread_count(r)
    }
    fn mark_read(&self, r: UserId, id: NotificationId) -> InboxResult<Notification> {
        self.inner.mark_read(r, id)
    }
    fn mark_all_read(&self, r: UserId) -> InboxResult<usize> {
        self.inner.mark_all_read(r)
    }
    fn delete(&self, r: UserId, id: NotificationId) -> InboxResult<()> {
        self.inner.delete(r, id)
    }
    fn has_escalation(&self, r: UserId, k: CaseKind, c: CaseId) -> InboxResult<bool> {
        self.inner.has_escalation(r, k, c)
    }
}

// =============================================================================
// FAN-OUT
// =============================================================================

#[tokio::test]
async fn test_created_case_reaches_every_elevated_user() {
    let w = World::new();
    let mut sub = w.subscribe();
    let case = w
        .open_case(CaseKind::Deployment, w.handler, Duration::hours(1))
        .await;

    let event = next_event(&mut sub).await;
    assert!(matches!(event, CaseEvent::CaseCreated { .. }));
    let report = w.container.dispatcher.dispatch(&event);
    assert_eq!(report.delivered.len(), w.admins.len());
    assert!(report.failed.is_empty());

    for admin in w.admins {
        let notices = inbox_of(w.container.inbox.as_ref(), admin);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].notice_type, NoticeType::CaseCreated);
        assert_eq!(notices[0].case_id, Some(case.id));
        assert_eq!(notices[0].case_kind, Some(CaseKind::Deployment));
    }
    assert!(inbox_of(w.container.inbox.as_ref(), w.staff).is_empty());
    assert!(inbox_of(w.container.inbox.as_ref(), w.handler_user).is_empty());
}

#[tokio::test]
async fn test_failed_append_does_not_block_other_recipients() {
    let w = World::new();
    let failing = Arc::new(FailingInbox {
        inner: InboxService::new(
            Arc::new(InMemoryNotificationStore::new()),
            w.clock.clone(),
        ),
        broken: w.admins[1],
    });
    let channel = Arc::new(RecordingChannel::new());
    let dispatcher = Dispatcher::new(
        failing.clone(),
        w.container.directory.clone(),
        w.container.directory.clone(),
        channel.clone(),
    );

    let mut sub = w.subscribe();
    let case = w
        .open_case(CaseKind::Incident, w.handler, Duration::hours(1))
        .await;
    let report = dispatcher.dispatch(&next_event(&mut sub).await);

    assert_eq!(report.delivered, vec![w.admins[0], w.admins[2]]);
    assert_eq!(report.failed, vec![w.admins[1]]);
    for admin in [w.admins[0], w.admins[2]] {
        let notices = inbox_of(failing.as_ref(), admin);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].case_id, Some(case.id));
    }
    assert!(inbox_of(failing.as_ref(), w.admins[1]).is_empty());
    assert_eq!(channel.count(), 1);
}

#[tokio::test]
async fn test_transition_notifies_participants_except_actor() {
    let w = World::new();
    let case = w
        .open_case(CaseKind::Maintenance, w.handler, Duration::hours(1))
        .await;

    let mut sub = w.subscribe();
    let handler_actor = CurrentUser {
        id: w.handler_user,
        role: Role::User,
    };
    w.container
        .cases
        .transition_status(
            handler_actor,
            CaseKind::Maintenance,
            case.id,
            CaseStatus::Completed,
            case.version,
        )
        .await
        .unwrap();

    let report = w.container.dispatcher.dispatch(&next_event(&mut sub).await);
    assert_eq!(report.delivered, vec![w.staff]);

    let notices = inbox_of(w.container.inbox.as_ref(), w.staff);
    assert_eq!(notices[0].notice_type, NoticeType::CaseCompleted);
    assert!(inbox_of(w.container.inbox.as_ref(), w.handler_user).is_empty());
}

#[tokio::test]
async fn test_dispatch_worker_drains_the_bus() {
    let World {
        clock,
        container,
        workers,
        staff,
        handler,
        admins,
        ..
    } = World::new();
    let worker = tokio::spawn(workers.dispatch.run());

    let actor = CurrentUser {
        id: staff,
        role: Role::User,
    };
    let start = clock.now() - Duration::hours(1);
    container
        .cases
        .create_case(actor, CaseKind::Receiving, new_case(CaseKind::Receiving, handler, start))
        .await
        .unwrap();

    let inbox = container.inbox.clone();
    let mut counts = Vec::new();
    for _ in 0..50 {
        counts = admins
            .iter()
            .map(|admin| inbox.unread_count(*admin).unwrap())
            .collect();
        if counts.iter().all(|c| *c == 1) {
            break;
        }
        tokio::time::sleep(StdDuration::from_millis(10)).await;
    }
    assert_eq!(counts, vec![1, 1, 1]);
    worker.abort();
}

#[tokio::test]
async fn test_dispatch_worker_catches_up_after_a_burst() {
    const BURST: usize = 1200;

    let World {
        clock,
        container,
        workers,
        staff,
        handler,
        admins,
        ..
    } = World::new();

    let actor = CurrentUser {
        id: staff,
        role: Role::User,
    };
    let start = clock.now() - Duration::hours(1);
    for _ in 0..BURST {
        container
            .cases
            .create_case(actor, CaseKind::Delivery, new_case(CaseKind::Delivery, handler, start))
            .await
            .unwrap();
    }

    // The worker only starts once every event is already queued.
    let worker = tokio::spawn(workers.dispatch.run());

    let inbox = container.inbox.clone();
    let mut counts = Vec::new();
    for _ in 0..500 {
        counts = admins
            .iter()
            .map(|admin| inbox.unread_count(*admin).unwrap())
            .collect();
        if counts.iter().all(|c| *c == BURST) {
            break;
        }
        tokio::time::sleep(StdDuration::from_millis(10)).await;
    }
    assert_eq!(counts, vec![BURST; 3]);
    worker.abort();
}

// =============================================================================
// STALE ESCALATION
// =============================================================================

#[tokio::test]
async fn test_stale_case_escalates_once() {
    let w = World::new();
    let case = w
        .open_case(CaseKind::Internal, w.handler, Duration::hours(20))
        .await;
    assert_eq!(case.status, CaseStatus::Received);

    let first = w.container.monitor.scan().unwrap();
    assert_eq!(first.escalated, 1);
    let notices = inbox_of(w.container.inbox.as_ref(), w.handler_user);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].notice_type, NoticeType::StaleEscalation);
    assert_eq!(notices[0].case_id, Some(case.id));

    let second = w.container.monitor.scan().unwrap();
    assert_eq!(second.escalated, 0);
    assert_eq!(second.skipped_duplicate, 1);
    assert_eq!(inbox_of(w.container.inbox.as_ref(), w.handler_user).len(), 1);
}

#[tokio::test]
async fn test_repeated_scans_escalate_each_case_at_most_once() {
    let w = World::new();
    let stale_a = w
        .open_case(CaseKind::Deployment, w.handler, Duration::hours(30))
        .await;
    let stale_b = w
        .open_case(CaseKind::Warranty, w.handler, Duration::hours(19))
        .await;
    w.open_case(CaseKind::Delivery, w.floater, Duration::hours(40))
        .await;
    w.open_case(CaseKind::Incident, w.handler, Duration::hours(2))
        .await;
    let closed = w
        .open_case(CaseKind::Receiving, w.handler, Duration::hours(50))
        .await;
    w.container
        .cases
        .transition_status(
            w.admin_actor(),
            CaseKind::Receiving,
            closed.id,
            CaseStatus::Cancelled,
            closed.version,
        )
        .await
        .unwrap();

    let first = w.container.monitor.scan().unwrap();
    assert_eq!(first.escalated, 2);
    assert_eq!(first.skipped_no_identity, 1);

    w.clock.advance(Duration::minutes(30));
    let second = w.container.monitor.scan().unwrap();
    assert_eq!(second.escalated, 0);
    assert_eq!(second.skipped_duplicate, 2);

    let mut escalated: Vec<CaseId> = inbox_of(w.container.inbox.as_ref(), w.handler_user)
        .into_iter()
        .filter(|n| n.notice_type == NoticeType::StaleEscalation)
        .filter_map(|n| n.case_id)
        .collect();
    escalated.sort_by_key(|id| id.to_string());
    let mut expected = vec![stale_a.id, stale_b.id];
    expected.sort_by_key(|id| id.to_string());
    assert_eq!(escalated, expected);
}

#[tokio::test]
async fn test_case_ageing_past_threshold_escalates_later() {
    let w = World::new();
    w.open_case(CaseKind::Maintenance, w.handler, Duration::hours(10))
        .await;

    assert_eq!(w.container.monitor.scan().unwrap().escalated, 0);
    w.clock.advance(Duration::hours(9));
    assert_eq!(w.container.monitor.scan().unwrap().escalated, 1);
    assert_eq!(w.container.monitor.scan().unwrap().escalated, 0);
}
