//! Status transitions on a case.
//!
//! ```text
//! RECEIVED ──→ IN_PROGRESS ──→ COMPLETED (terminal, endDate set)
//!    │              │
//!    └──────────────┴────────→ CANCELLED (terminal)
//! ```

use shared_types::{CaseStatus, PersonId, Timestamp};

use super::case::Case;
use crate::error::{LifecycleError, LifecycleResult};

/// Move `case` to `target`. COMPLETED stamps `end_date` in the same write.
pub fn apply_transition(
    case: &mut Case,
    target: CaseStatus,
    now: Timestamp,
) -> LifecycleResult<()> {
    if case.status == CaseStatus::Completed && target == CaseStatus::Completed {
        return Err(LifecycleError::AlreadyCompleted);
    }
    if !case.status.can_transition_to(target) {
        return Err(LifecycleError::InvalidTransition {
            from: case.status,
            to: target,
        });
    }

    case.status = target;
    if target == CaseStatus::Completed {
        case.end_date = Some(now);
    }
    case.touch(now);
    Ok(())
}

/// Put `handler` on a non-terminal case.
pub fn apply_assignment(case: &mut Case, handler: PersonId, now: Timestamp) -> LifecycleResult<()> {
    if case.status.is_terminal() {
        return Err(LifecycleError::CaseClosed {
            status: case.status,
        });
    }
    case.handler_id = Some(handler);
    case.touch(now);
    Ok(())
}
