//! Domain layer for the Notification Dispatcher

pub mod notice;
pub mod report;

pub use notice::{notice_type, render_notice};
pub use report::{DispatchReport, SkipReason};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use shared_bus::{CaseEvent, CaseSummary, PersonRef};
    use shared_types::{CaseId, CaseKind, CaseStatus, PersonId, UserId};

    pub(crate) fn summary(kind: CaseKind) -> CaseSummary {
        CaseSummary {
            case_id: CaseId::new(),
            kind,
            title: "Replace core switch".to_string(),
            description: "Rack B switch drops packets".to_string(),
            status: CaseStatus::Received,
            requester: PersonRef {
                id: PersonId::new(),
                name: Some("Nguyen Van A".to_string()),
            },
            handler: Some(PersonRef {
                id: PersonId::new(),
                name: Some("Tran Thi B".to_string()),
            }),
            counterparty_name: Some("Head office".to_string()),
            start_date: Utc::now(),
            end_date: None,
            version: 1,
        }
    }

    pub(crate) fn transitioned(from: CaseStatus, to: CaseStatus, actor: UserId) -> CaseEvent {
        let mut case = summary(CaseKind::Internal);
        case.status = to;
        CaseEvent::CaseTransitioned {
            case,
            from,
            to,
            actor,
            occurred_at: Utc::now(),
        }
    }
}
