//! Error types for the Stale Case Monitor

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// Another scan is in progress in this process.
    #[error("A stale scan is already running")]
    AlreadyRunning,

    #[error("Invalid monitor configuration: {0}")]
    Config(String),
}

pub type MonitorResult<T> = Result<T, MonitorError>;
