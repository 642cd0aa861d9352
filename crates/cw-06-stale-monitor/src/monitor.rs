//! Stale Case Monitor
//!
//! One pass walks every case kind, picks open cases with a handler whose
//! start date is older than the threshold, and escalates each one to its
//! handler exactly once.
//!
//! The "already escalated?" check reads the inbox before dispatching. It is
//! only race-free with one active scan, so `scan` refuses to run while
//! another scan in the same process is in progress. The inbox's own
//! uniqueness rule on escalations backs this up across processes.

use case_telemetry::{HistogramTimer, STALE_ESCALATIONS, STALE_SCAN_DURATION};
use cw_01_case_lifecycle::{case_summary, Case, CaseRepository};
use cw_03_notification_inbox::NotificationInbox;
use cw_04_notification_dispatcher::{NotificationDispatch, SkipReason};
use shared_bus::CaseEvent;
use shared_types::{CaseKind, Clock, PersonDirectory, Timestamp, UserId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::MonitorConfig;
use crate::error::{MonitorError, MonitorResult};

/// Outcome of one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Stale candidates examined.
    pub scanned: usize,
    pub escalated: usize,
    /// Handler has no linked login identity.
    pub skipped_no_identity: usize,
    /// Escalation already delivered earlier.
    pub skipped_duplicate: usize,
    pub failed: usize,
}

enum Outcome {
    Escalated,
    NoIdentity,
    Duplicate,
    Failed,
}

/// Clears the running flag when a scan ends, however it ends.
struct ScanGuard<'a>(&'a AtomicBool);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct StaleCaseMonitor {
    config: MonitorConfig,
    cases: Arc<dyn CaseRepository>,
    persons: Arc<dyn PersonDirectory>,
    inbox: Arc<dyn NotificationInbox>,
    dispatcher: Arc<dyn NotificationDispatch>,
    clock: Arc<dyn Clock>,
    running: AtomicBool,
}

impl StaleCaseMonitor {
    pub fn new(
        config: MonitorConfig,
        cases: Arc<dyn CaseRepository>,
        persons: Arc<dyn PersonDirectory>,
        inbox: Arc<dyn NotificationInbox>,
        dispatcher: Arc<dyn NotificationDispatch>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            cases,
            persons,
            inbox,
            dispatcher,
            clock,
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one pass over every case kind.
    pub fn scan(&self) -> MonitorResult<ScanReport> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Stale scan requested while another is running, skipping");
            return Err(MonitorError::AlreadyRunning);
        }
        let _guard = ScanGuard(&self.running);
        let _timer = HistogramTimer::new(&STALE_SCAN_DURATION);

        let now = self.clock.now();
        let cutoff = now - self.config.threshold;
        let mut report = ScanReport::default();

        for kind in CaseKind::ALL {
            let candidates = match self.cases.open_started_before(kind, cutoff) {
                Ok(cases) => cases,
                Err(e) => {
                    error!(kind = %kind, error = %e, "Could not read cases for stale scan");
                    report.failed += 1;
                    continue;
                }
            };

            for case in candidates {
                report.scanned += 1;
                match self.escalate(&case, now) {
                    Outcome::Escalated => report.escalated += 1,
                    Outcome::NoIdentity => report.skipped_no_identity += 1,
                    Outcome::Duplicate => report.skipped_duplicate += 1,
                    Outcome::Failed => report.failed += 1,
                }
            }
        }

        info!(
            scanned = report.scanned,
            escalated = report.escalated,
            skipped_no_identity = report.skipped_no_identity,
            skipped_duplicate = report.skipped_duplicate,
            failed = report.failed,
            "Stale scan finished"
        );
        Ok(report)
    }

    fn handler_user(&self, case: &Case) -> Result<Option<UserId>, Outcome> {
        let Some(handler) = case.handler_id else {
            return Ok(None);
        };
        match self.persons.find_person_by_id(handler) {
            Ok(person) => Ok(person.and_then(|p| p.linked_user)),
            Err(e) => {
                warn!(case_id = %case.id, handler = %handler, error = %e, "Handler lookup failed");
                Err(Outcome::Failed)
            }
        }
    }

    fn escalate(&self, case: &Case, now: Timestamp) -> Outcome {
        let recipient = match self.handler_user(case) {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(case_id = %case.id, "Stale case handler has no login, skipping");
                return Outcome::NoIdentity;
            }
            Err(outcome) => return outcome,
        };

        match self.inbox.has_escalation(recipient, case.kind, case.id) {
            Ok(true) => return Outcome::Duplicate,
            Ok(false) => {}
            Err(e) => {
                warn!(case_id = %case.id, error = %e, "Escalation lookup failed");
                return Outcome::Failed;
            }
        }

        let event = CaseEvent::StaleCaseDetected {
            case: case_summary(case, self.persons.as_ref()),
            age_hours: (now - case.start_date).num_hours(),
            occurred_at: now,
        };
        let report = self.dispatcher.dispatch(&event);

        if !report.delivered.is_empty() {
            STALE_ESCALATIONS.inc();
            info!(
                case_id = %case.id,
                kind = %case.kind,
                recipient = %recipient,
                "Stale case escalated"
            );
            Outcome::Escalated
        } else if !report.duplicates.is_empty() {
            Outcome::Duplicate
        } else if matches!(
            report.skipped,
            Some(SkipReason::NoHandler | SkipReason::NoLinkedIdentity)
        ) {
            Outcome::NoIdentity
        } else {
            Outcome::Failed
        }
    }
}
