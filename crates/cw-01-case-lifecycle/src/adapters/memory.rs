//! In-memory case repository.
//!
//! One table per case kind. The table for a kind is picked by exhaustive
//! match, so adding a kind without a table does not compile.

use parking_lot::RwLock;
use shared_types::{CaseId, CaseKind, CaseStatus, Timestamp};
use std::collections::HashMap;

use crate::domain::Case;
use crate::error::{LifecycleError, LifecycleResult};
use crate::ports::CaseRepository;

type Table = RwLock<HashMap<CaseId, Case>>;

/// In-memory `CaseRepository`.
#[derive(Default)]
pub struct InMemoryCaseRepository {
    internal: Table,
    deployment: Table,
    maintenance: Table,
    warranty: Table,
    delivery: Table,
    receiving: Table,
    incident: Table,
}

impl InMemoryCaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: CaseKind) -> &Table {
        match kind {
            CaseKind::Internal => &self.internal,
            CaseKind::Deployment => &self.deployment,
            CaseKind::Maintenance => &self.maintenance,
            CaseKind::Warranty => &self.warranty,
            CaseKind::Delivery => &self.delivery,
            CaseKind::Receiving => &self.receiving,
            CaseKind::Incident => &self.incident,
        }
    }

    /// Number of cases across all kinds.
    pub fn len(&self) -> usize {
        CaseKind::ALL
            .iter()
            .map(|kind| self.table(*kind).read().len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CaseRepository for InMemoryCaseRepository {
    fn insert(&self, case: Case) -> LifecycleResult<()> {
        let mut table = self.table(case.kind).write();
        if table.contains_key(&case.id) {
            return Err(LifecycleError::Storage(format!(
                "duplicate case id {}",
                case.id
            )));
        }
        table.insert(case.id, case);
        Ok(())
    }

    fn get(&self, kind: CaseKind, id: CaseId) -> LifecycleResult<Option<Case>> {
        Ok(self.table(kind).read().get(&id).cloned())
    }

    fn update(
        &self,
        kind: CaseKind,
        id: CaseId,
        expected_version: Option<u64>,
        mutate: &mut dyn FnMut(&mut Case) -> LifecycleResult<()>,
    ) -> LifecycleResult<Case> {
        let mut table = self.table(kind).write();
        let stored = table
            .get_mut(&id)
            .ok_or(LifecycleError::NotFound { kind, id })?;

        if let Some(expected) = expected_version {
            if stored.version != expected {
                return Err(LifecycleError::VersionMismatch {
                    expected,
                    actual: stored.version,
                });
            }
        }

        let mut draft = stored.clone();
        mutate(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }

    fn list(&self, kind: CaseKind, status: Option<CaseStatus>) -> LifecycleResult<Vec<Case>> {
        let mut cases: Vec<Case> = self
            .table(kind)
            .read()
            .values()
            .filter(|case| status.map_or(true, |s| case.status == s))
            .cloned()
            .collect();
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(cases)
    }

    fn open_started_before(&self, kind: CaseKind, cutoff: Timestamp) -> LifecycleResult<Vec<Case>> {
        let mut cases: Vec<Case> = self
            .table(kind)
            .read()
            .values()
            .filter(|case| {
                case.start_date < cutoff && !case.status.is_terminal() && case.handler_id.is_some()
            })
            .cloned()
            .collect();
        cases.sort_by_key(|case| case.start_date);
        Ok(cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{apply_transition, CaseDetails};
    use chrono::{Duration, Utc};
    use shared_types::PersonId;

    fn case(kind: CaseKind, start: Timestamp) -> Case {
        Case {
            id: CaseId::new(),
            kind,
            title: "t".to_string(),
            description: "d".to_string(),
            requester_id: PersonId::new(),
            handler_id: Some(PersonId::new()),
            counterparty_id: None,
            counterparty_name: None,
            details: CaseDetails::Internal,
            status: CaseStatus::Received,
            start_date: start,
            end_date: None,
            user_assessment: None,
            admin_assessment: None,
            version: 1,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_tables_are_disjoint_by_kind() {
        let repo = InMemoryCaseRepository::new();
        let c = case(CaseKind::Delivery, Utc::now());
        let id = c.id;
        repo.insert(c).unwrap();

        assert!(repo.get(CaseKind::Delivery, id).unwrap().is_some());
        assert!(repo.get(CaseKind::Receiving, id).unwrap().is_none());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_checks_version() {
        let repo = InMemoryCaseRepository::new();
        let c = case(CaseKind::Internal, Utc::now());
        let id = c.id;
        repo.insert(c).unwrap();

        let err = repo
            .update(CaseKind::Internal, id, Some(7), &mut |_| Ok(()))
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::VersionMismatch {
                expected: 7,
                actual: 1
            }
        );

        let updated = repo
            .update(CaseKind::Internal, id, Some(1), &mut |case| {
                apply_transition(case, CaseStatus::InProgress, Utc::now())
            })
            .unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(
            repo.get(CaseKind::Internal, id).unwrap().unwrap().status,
            CaseStatus::InProgress
        );
    }

    #[test]
    fn test_failed_mutation_writes_nothing() {
        let repo = InMemoryCaseRepository::new();
        let c = case(CaseKind::Internal, Utc::now());
        let id = c.id;
        repo.insert(c.clone()).unwrap();

        let result = repo.update(CaseKind::Internal, id, None, &mut |case| {
            case.title = "changed".to_string();
            Err(LifecycleError::AlreadyCompleted)
        });
        assert!(result.is_err());
        assert_eq!(repo.get(CaseKind::Internal, id).unwrap().unwrap(), c);
    }

    #[test]
    fn test_update_unknown_case() {
        let repo = InMemoryCaseRepository::new();
        assert!(matches!(
            repo.update(CaseKind::Warranty, CaseId::new(), None, &mut |_| Ok(())),
            Err(LifecycleError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_newest_first_with_status_filter() {
        let repo = InMemoryCaseRepository::new();
        let now = Utc::now();
        let older = case(CaseKind::Incident, now - Duration::hours(2));
        let mut newer = case(CaseKind::Incident, now);
        newer.status = CaseStatus::Cancelled;
        repo.insert(older.clone()).unwrap();
        repo.insert(newer.clone()).unwrap();

        let all = repo.list(CaseKind::Incident, None).unwrap();
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);

        let cancelled = repo
            .list(CaseKind::Incident, Some(CaseStatus::Cancelled))
            .unwrap();
        assert_eq!(cancelled.len(), 1);
    }

    #[test]
    fn test_open_started_before_filters() {
        let repo = InMemoryCaseRepository::new();
        let now = Utc::now();
        let cutoff = now - Duration::hours(18);

        let stale = case(CaseKind::Maintenance, now - Duration::hours(20));
        let fresh = case(CaseKind::Maintenance, now - Duration::hours(2));
        let mut unassigned = case(CaseKind::Maintenance, now - Duration::hours(30));
        unassigned.handler_id = None;
        let mut done = case(CaseKind::Maintenance, now - Duration::hours(40));
        done.status = CaseStatus::Completed;

        for c in [stale.clone(), fresh, unassigned, done] {
            repo.insert(c).unwrap();
        }

        let found = repo
            .open_started_before(CaseKind::Maintenance, cutoff)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, stale.id);
    }
}
