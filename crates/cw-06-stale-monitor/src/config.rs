//! Monitor configuration.

use std::time::Duration;

use crate::error::{MonitorError, MonitorResult};

/// Reference threshold: 18 hours since `startDate`.
pub const DEFAULT_THRESHOLD_HOURS: i64 = 18;

#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Age past which an open case is escalated.
    pub threshold: chrono::Duration,
    /// Time between scans.
    pub interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold: chrono::Duration::hours(DEFAULT_THRESHOLD_HOURS),
            interval: Duration::from_secs(3600),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> MonitorResult<()> {
        if self.threshold <= chrono::Duration::zero() {
            return Err(MonitorError::Config("threshold must be positive".into()));
        }
        if self.interval.is_zero() {
            return Err(MonitorError::Config("interval must be non-zero".into()));
        }
        Ok(())
    }
}
