//! The runtime orchestrating every subsystem and background worker.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::container::{load_directory, ContainerError, RuntimeConfig, ServiceContainer, Workers};
use cw_02_evaluation_catalog::CatalogError;
use cw_07_api_gateway::GatewayError;

/// How long shutdown waits for workers before abandoning them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Runtime startup errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("Failed to seed default evaluation scales: {0}")]
    Seed(#[from] CatalogError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Runtime already started")]
    AlreadyStarted,
}

/// The main runtime.
pub struct CaseRuntime {
    config: RuntimeConfig,
    /// Every initialized service.
    container: Arc<ServiceContainer>,
    /// Taken by `start`.
    workers: Option<Workers>,
    tasks: Vec<JoinHandle<()>>,
    http_addr: Option<SocketAddr>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl CaseRuntime {
    /// Build the runtime, loading the directory from `CW_DIRECTORY_FILE`.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let directory = load_directory(config.directory_file.as_deref())?;
        let (container, workers) = ServiceContainer::new(&config, directory)?;
        Ok(Self::from_parts(config, container, workers))
    }

    /// Build the runtime around an already assembled container.
    pub fn from_parts(
        config: RuntimeConfig,
        container: ServiceContainer,
        workers: Workers,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            config,
            container: Arc::new(container),
            workers: Some(workers),
            tasks: Vec::new(),
            http_addr: None,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Start the runtime.
    ///
    /// ## Startup Sequence
    ///
    /// 1. Seed the built-in evaluation scales (if enabled)
    /// 2. Start the dispatcher and chat outbox workers
    /// 3. Start the stale case monitor
    /// 4. Bind and serve the HTTP gateway
    pub async fn start(&mut self) -> Result<(), RuntimeError> {
        let workers = self.workers.take().ok_or(RuntimeError::AlreadyStarted)?;

        info!("===========================================");
        info!("  Case Workflow Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        if self.config.catalog.seed_defaults {
            let seeded = self.container.catalog.seed_defaults()?;
            info!(seeded, "Default evaluation scales checked");
        }

        self.start_workers(workers);
        self.start_monitor();
        self.start_gateway().await?;

        info!("All subsystems initialized and running");
        Ok(())
    }

    fn start_workers(&mut self, workers: Workers) {
        let dispatch = workers.dispatch;
        let mut dispatch_shutdown = self.shutdown_rx.clone();
        self.tasks.push(tokio::spawn(async move {
            tokio::select! {
                _ = dispatch.run() => {}
                _ = dispatch_shutdown.changed() => {
                    info!("[cw-04] Shutdown signal received");
                }
            }
        }));

        if let Some(outbox) = workers.outbox {
            let mut outbox_shutdown = self.shutdown_rx.clone();
            self.tasks.push(tokio::spawn(async move {
                tokio::select! {
                    _ = outbox.run() => {}
                    _ = outbox_shutdown.changed() => {
                        info!("[cw-05] Shutdown signal received");
                    }
                }
            }));
        }
    }

    fn start_monitor(&mut self) {
        let monitor = self.container.monitor.clone();
        let shutdown = self.shutdown_rx.clone();
        self.tasks
            .push(tokio::spawn(cw_06_stale_monitor::run_periodic(monitor, shutdown)));
    }

    async fn start_gateway(&mut self) -> Result<(), RuntimeError> {
        let listener = cw_07_api_gateway::bind(&self.config.gateway).await?;
        self.http_addr = Some(listener.local_addr().map_err(GatewayError::from)?);

        let state = self.container.app_state();
        let timeout = self.config.gateway.request_timeout;
        let mut shutdown = self.shutdown_rx.clone();
        let signal = async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
        };

        self.tasks.push(tokio::spawn(async move {
            if let Err(e) = cw_07_api_gateway::serve(listener, state, timeout, signal).await {
                error!(error = %e, "[cw-07] HTTP gateway failed");
            }
        }));
        Ok(())
    }

    /// Address the gateway is bound to, once started.
    pub fn http_addr(&self) -> Option<SocketAddr> {
        self.http_addr
    }

    /// Get a reference to the service container.
    pub fn container(&self) -> Arc<ServiceContainer> {
        Arc::clone(&self.container)
    }

    /// Shutdown the runtime gracefully.
    ///
    /// ## Shutdown Sequence
    ///
    /// 1. Signal shutdown to all workers and the gateway
    /// 2. Wait for them to finish (bounded)
    pub async fn shutdown(self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        for task in self.tasks {
            match tokio::time::timeout(SHUTDOWN_GRACE, task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Worker task ended abnormally"),
                Err(_) => warn!("Worker did not stop within the grace period"),
            }
        }

        info!("Shutdown complete");
    }
}
