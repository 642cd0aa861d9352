//! # cw-06-stale-monitor
//!
//! Escalates cases that stay open too long.
//!
//! A case is stale when its start date is older than the threshold
//! (default 18 hours), its status is not terminal, and it has a handler.
//! Each stale case yields at most one escalation notice to the handler's
//! linked login; handlers without one are skipped.
//!
//! Run a single monitor per deployment. Within a process, overlapping
//! scans are refused.

pub mod config;
pub mod error;
pub mod monitor;
pub mod runner;

pub use config::{MonitorConfig, DEFAULT_THRESHOLD_HOURS};
pub use error::{MonitorError, MonitorResult};
pub use monitor::{ScanReport, StaleCaseMonitor};
pub use runner::run_periodic;
