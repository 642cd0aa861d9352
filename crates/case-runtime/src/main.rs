//! # Case Workflow Service
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging and metrics
//! 2. Load configuration from `CW_*` environment variables
//! 3. Build every subsystem and start the background workers
//! 4. Serve HTTP until Ctrl+C

use anyhow::{Context, Result};
use case_runtime::{CaseRuntime, RuntimeConfig};
use case_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_telemetry(&telemetry).context("failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env().context("invalid configuration")?;

    let mut runtime = CaseRuntime::new(config).context("failed to build services")?;
    runtime.start().await.context("failed to start runtime")?;

    if let Some(addr) = runtime.http_addr() {
        info!(%addr, "Case workflow service is running. Press Ctrl+C to stop.");
    }
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
