//! # cw-01-case-lifecycle
//!
//! Case Repository and Case Lifecycle Controller for the seven case kinds
//! (internal, deployment, maintenance, warranty, delivery, receiving,
//! incident).
//!
//! ## Overview
//!
//! - **Typed tables**: one table per kind, chosen by exhaustive match
//! - **Status machine**: monotonic, CANCELLED from any open status, nothing
//!   leaves a terminal status
//! - **Optimistic concurrency**: every case carries a `version`; transitions
//!   and reassignments must name the version the caller saw
//! - **Dual assessment**: USER and ADMIN score blocks validated against the
//!   active catalog vocabulary
//!
//! ## Flow
//!
//! ```text
//! client ──→ CaseLifecycleService ──persist──→ CaseRepository
//!                     │
//!                     └──publish──→ shared bus ──→ Dispatcher
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{BuiltinScoreRanges, InMemoryCaseRepository};
pub use domain::{
    Assessment, AssessmentScores, Case, CaseDetails, KindRefs, NewCase, ScoreRange,
};
pub use error::{LifecycleError, LifecycleResult};
pub use ports::{CaseLifecycleApi, CaseRepository, ScoreRangeSource};
pub use service::{case_summary, CaseLifecycleService, LifecycleConfig, RequesterFallback};
