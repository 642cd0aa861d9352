//! Domain module for the Case Lifecycle subsystem
//!
//! Pure rules: field validation, score ranges, status transitions.
//! No I/O, no async.

pub mod assessment;
pub mod case;
pub mod transition;

pub use assessment::{validate_scores, Assessment, AssessmentScores, ScoreRange};
pub use case::{Case, CaseDetails, KindRefs, NewCase, ValidatedNewCase};
pub use transition::{apply_assignment, apply_transition};
