//! Periodic driver for the monitor.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::monitor::StaleCaseMonitor;

/// Scan on every tick until `shutdown` flips to true or its sender is
/// dropped. Ticks missed while a scan runs are skipped, not queued.
pub async fn run_periodic(monitor: Arc<StaleCaseMonitor>, mut shutdown: watch::Receiver<bool>) {
    let period = monitor.config().interval;
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        interval_secs = period.as_secs(),
        threshold_hours = monitor.config().threshold.num_hours(),
        "Stale case monitor started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = monitor.scan() {
                    warn!(error = %e, "Stale scan skipped");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Stale case monitor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::monitor::tests::{fixture, open_case};
    use chrono::Duration as Age;
    use cw_03_notification_inbox::NotificationInbox;
    use shared_types::{CaseKind, CaseStatus};
    use std::time::Duration;

    #[tokio::test]
    async fn test_repeated_ticks_escalate_once() {
        let f = fixture(MonitorConfig {
            interval: Duration::from_millis(10),
            ..MonitorConfig::default()
        });
        let (_, login) =
            open_case(&f, CaseKind::Internal, Age::hours(20), CaseStatus::Received, true);

        let (tx, rx) = watch::channel(false);
        let worker = tokio::spawn(run_periodic(f.monitor.clone(), rx));

        tokio::time::sleep(Duration::from_millis(80)).await;
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(2), worker)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(f.inbox.unread_count(login.unwrap()).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dropped_sender_stops_runner() {
        let f = fixture(MonitorConfig {
            interval: Duration::from_secs(60),
            ..MonitorConfig::default()
        });
        let (tx, rx) = watch::channel(false);
        let worker = tokio::spawn(run_periodic(f.monitor.clone(), rx));
        drop(tx);
        tokio::time::timeout(Duration::from_secs(2), worker)
            .await
            .unwrap()
            .unwrap();
    }
}
