//! Driving Ports (API - Inbound)

use shared_bus::CaseEvent;

use crate::domain::DispatchReport;

/// Fan-out entry point. Never fails: every problem is isolated per recipient
/// and recorded on the report.
pub trait NotificationDispatch: Send + Sync {
    fn dispatch(&self, event: &CaseEvent) -> DispatchReport;
}
