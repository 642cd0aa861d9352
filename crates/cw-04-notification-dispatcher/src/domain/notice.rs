//! Inbox notice content for each event.

use cw_03_notification_inbox::{escalation_marker, NewNotice, NoticeType};
use shared_bus::CaseEvent;
use shared_types::CaseStatus;

/// Notice type an event is delivered as.
pub fn notice_type(event: &CaseEvent) -> NoticeType {
    match event {
        CaseEvent::CaseCreated { .. } => NoticeType::CaseCreated,
        CaseEvent::CaseTransitioned {
            to: CaseStatus::Completed,
            ..
        } => NoticeType::CaseCompleted,
        CaseEvent::CaseTransitioned { .. } => NoticeType::CaseUpdated,
        CaseEvent::CaseAssigned { .. } => NoticeType::CaseAssigned,
        CaseEvent::StaleCaseDetected { .. } => NoticeType::StaleEscalation,
    }
}

/// Build the inbox notice for an event. Every recipient gets the same copy.
pub fn render_notice(event: &CaseEvent) -> NewNotice {
    let case = event.case();
    let label = case.kind.label();

    let (title, message) = match event {
        CaseEvent::CaseCreated { .. } => (
            format!("New {}: {}", label.to_lowercase(), case.title),
            format!("{} submitted \"{}\".", case.requester.display(), case.title),
        ),
        CaseEvent::CaseTransitioned { from, to, .. } => (
            format!("{} {}: {}", label, case.kind.status_label(*to).to_lowercase(), case.title),
            format!(
                "Status changed from {} to {}.",
                case.kind.status_label(*from),
                case.kind.status_label(*to)
            ),
        ),
        CaseEvent::CaseAssigned { .. } => (
            format!("{} assigned to you: {}", label, case.title),
            format!("You are now handling \"{}\".", case.title),
        ),
        CaseEvent::StaleCaseDetected { age_hours, .. } => (
            format!(
                "Overdue {}: {} {}",
                label.to_lowercase(),
                case.title,
                escalation_marker(case.kind, case.case_id)
            ),
            format!(
                "\"{}\" has been open for {} hours and is still {}.",
                case.title,
                age_hours,
                case.kind.status_label(case.status).to_lowercase()
            ),
        ),
    };

    NewNotice::about_case(notice_type(event), case.kind, case.case_id, title, message)
}
