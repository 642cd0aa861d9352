//! Prometheus metrics for the case workflow.
//!
//! All metrics follow the naming convention: `cw_<area>_<metric>_<unit>`.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CASE LIFECYCLE
    // =========================================================================

    /// Cases created, by kind
    pub static ref CASES_CREATED: IntCounterVec = IntCounterVec::new(
        Opts::new("cw_cases_created_total", "Total cases created"),
        &["kind"]
    ).expect("metric creation failed");

    /// Status transitions, by kind and target status
    pub static ref CASE_TRANSITIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("cw_case_transitions_total", "Total case status transitions"),
        &["kind", "status"]
    ).expect("metric creation failed");

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    /// Inbox notices written, by notice type
    pub static ref NOTIFICATIONS_DELIVERED: IntCounterVec = IntCounterVec::new(
        Opts::new("cw_notifications_delivered_total", "Inbox notices written"),
        &["type"]
    ).expect("metric creation failed");

    /// Inbox writes that failed and were skipped
    pub static ref NOTIFICATIONS_FAILED: IntCounter = IntCounter::new(
        "cw_notifications_failed_total",
        "Inbox notice writes that failed"
    ).expect("metric creation failed");

    // =========================================================================
    // EXTERNAL CHAT CHANNEL
    // =========================================================================

    /// Chat messages accepted by the external API
    pub static ref CHAT_MESSAGES_SENT: IntCounter = IntCounter::new(
        "cw_chat_messages_sent_total",
        "Chat messages delivered to the external channel"
    ).expect("metric creation failed");

    /// Chat messages that failed, timed out or were dropped on a full outbox
    pub static ref CHAT_MESSAGES_FAILED: IntCounter = IntCounter::new(
        "cw_chat_messages_failed_total",
        "Chat messages that could not be delivered"
    ).expect("metric creation failed");

    // =========================================================================
    // STALE MONITOR
    // =========================================================================

    /// Escalation notices emitted
    pub static ref STALE_ESCALATIONS: IntCounter = IntCounter::new(
        "cw_stale_escalations_total",
        "Stale case escalations emitted"
    ).expect("metric creation failed");

    /// Duration of one monitor pass
    pub static ref STALE_SCAN_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "cw_stale_scan_duration_seconds",
            "Time spent scanning all case kinds for stale cases"
        ).buckets(exponential_buckets(0.001, 2.0, 14).expect("valid bucket layout"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Call once at startup; a second call fails with `AlreadyReg`.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CASES_CREATED.clone()),
        Box::new(CASE_TRANSITIONS.clone()),
        Box::new(NOTIFICATIONS_DELIVERED.clone()),
        Box::new(NOTIFICATIONS_FAILED.clone()),
        Box::new(CHAT_MESSAGES_SENT.clone()),
        Box::new(CHAT_MESSAGES_FAILED.clone()),
        Box::new(STALE_ESCALATIONS.clone()),
        Box::new(STALE_SCAN_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
