//! # Case Telemetry
//!
//! Logging and metrics bootstrap for the case workflow runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use case_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CW_SERVICE_NAME` | `case-workflow` | Service name in logs |
//! | `CW_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `CW_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, CASES_CREATED, CASE_TRANSITIONS,
    CHAT_MESSAGES_FAILED, CHAT_MESSAGES_SENT, NOTIFICATIONS_DELIVERED, NOTIFICATIONS_FAILED,
    STALE_ESCALATIONS, STALE_SCAN_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and register metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
