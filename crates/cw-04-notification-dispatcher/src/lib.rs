//! # cw-04-notification-dispatcher
//!
//! Turns one case event into inbox notices and one external hand-off.
//!
//! | Event | Recipients | Notice type |
//! |-------|------------|-------------|
//! | `CaseCreated` | every elevated user | `CASE_CREATED` |
//! | `CaseTransitioned` | requester + handler minus actor | `CASE_COMPLETED` / `CASE_UPDATED` |
//! | `CaseAssigned` | new handler | `CASE_ASSIGNED` |
//! | `StaleCaseDetected` | handler (skipped without a linked login) | `STALE_ESCALATION` |
//!
//! `dispatch` never fails. A recipient whose append fails is logged and
//! counted; the others still get their notice.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod handler;
pub mod ports;
pub mod service;

pub use adapters::{DisabledChannel, RecordingChannel};
pub use domain::{render_notice, DispatchReport, SkipReason};
pub use error::{DispatchError, DispatchResult};
pub use handler::DispatchHandler;
pub use ports::{ExternalChannel, NotificationDispatch};
pub use service::Dispatcher;
