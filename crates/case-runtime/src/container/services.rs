//! # Service Container
//!
//! Builds every subsystem behind its ports and hands the background workers
//! to the runtime.
//!
//! ## Initialization Order
//!
//! 1. Shared infrastructure: clock, directory, event bus
//! 2. Evaluation catalog (lifecycle reads score ranges from it)
//! 3. Case lifecycle
//! 4. Notification inbox
//! 5. Chat channel (outbox + worker, or disabled)
//! 6. Dispatcher + its bus subscription
//! 7. Stale monitor

use std::path::Path;
use std::sync::Arc;

use cw_01_case_lifecycle::{CaseLifecycleApi, CaseLifecycleService, InMemoryCaseRepository};
use cw_02_evaluation_catalog::{
    EvaluationCatalogApi, EvaluationCatalogService, InMemoryCatalogStore, OptionCache,
};
use cw_03_notification_inbox::{InboxService, InMemoryNotificationStore, NotificationInbox};
use cw_04_notification_dispatcher::{
    DisabledChannel, DispatchHandler, Dispatcher, ExternalChannel,
};
use cw_05_chat_channel::{ChannelError, ChatOutbox, OutboxWorker, TelegramTransport};
use cw_06_stale_monitor::StaleCaseMonitor;
use cw_07_api_gateway::AppState;
use shared_bus::{EventFilter, EventTopic, InMemoryEventBus};
use shared_types::{Clock, DirectoryError, DirectorySeed, InMemoryDirectory, SystemClock};
use thiserror::Error;
use tracing::{info, warn};

use super::config::RuntimeConfig;
use crate::adapters::{CatalogScoreRanges, OutboxChannel};

/// Errors while assembling the services.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Failed to read directory file {path}: {source}")]
    DirectoryFile {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Chat transport: {0}")]
    Chat(#[from] ChannelError),
}

/// Load the directory seed, or start empty when no file is configured.
pub fn load_directory(path: Option<&Path>) -> Result<InMemoryDirectory, ContainerError> {
    let Some(path) = path else {
        warn!("CW_DIRECTORY_FILE not set; starting with an empty person/user directory");
        return Ok(InMemoryDirectory::new());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ContainerError::DirectoryFile {
        path: path.display().to_string(),
        source,
    })?;
    let directory = InMemoryDirectory::from_seed(DirectorySeed::from_json(&raw)?);
    info!(
        path = %path.display(),
        persons = directory.person_count(),
        users = directory.user_count(),
        "Loaded directory seed"
    );
    Ok(directory)
}

/// Background workers created with the services. The runtime spawns them.
pub struct Workers {
    pub dispatch: DispatchHandler,
    pub outbox: Option<OutboxWorker>,
}

/// Container holding every initialized service.
pub struct ServiceContainer {
    pub clock: Arc<dyn Clock>,
    pub directory: Arc<InMemoryDirectory>,
    pub bus: Arc<InMemoryEventBus>,
    pub catalog: Arc<EvaluationCatalogService>,
    pub cases: Arc<CaseLifecycleService>,
    pub repository: Arc<InMemoryCaseRepository>,
    pub inbox: Arc<InboxService>,
    pub dispatcher: Arc<Dispatcher>,
    pub monitor: Arc<StaleCaseMonitor>,
    pub chat_outbox: Option<Arc<ChatOutbox>>,
}

impl ServiceContainer {
    /// Build all services with the system clock.
    pub fn new(
        config: &RuntimeConfig,
        directory: InMemoryDirectory,
    ) -> Result<(Self, Workers), ContainerError> {
        Self::with_clock(config, directory, Arc::new(SystemClock))
    }

    /// Build all services on a caller-supplied clock.
    pub fn with_clock(
        config: &RuntimeConfig,
        directory: InMemoryDirectory,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, Workers), ContainerError> {
        let directory = Arc::new(directory);
        let bus = Arc::new(InMemoryEventBus::new());

        let catalog = Arc::new(EvaluationCatalogService::new(
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(OptionCache::new(config.catalog.cache_ttl)),
            clock.clone(),
        ));

        let repository = Arc::new(InMemoryCaseRepository::new());
        let cases = Arc::new(CaseLifecycleService::new(
            config.lifecycle.clone(),
            repository.clone(),
            directory.clone(),
            Arc::new(CatalogScoreRanges::new(catalog.clone())),
            bus.clone(),
            clock.clone(),
        ));

        let inbox = Arc::new(InboxService::new(
            Arc::new(InMemoryNotificationStore::new()),
            clock.clone(),
        ));

        let (channel, chat_outbox, outbox_worker) =
            if config.chat.enabled {
                let transport = Arc::new(TelegramTransport::from_config(&config.chat)?);
                let (outbox, worker) = ChatOutbox::new(
                    transport,
                    config.chat.parse_mode,
                    config.chat.outbox_capacity,
                    config.chat.timeout,
                );
                let outbox = Arc::new(outbox);
                info!(
                    base_url = %config.chat.base_url,
                    parse_mode = %config.chat.parse_mode,
                    capacity = config.chat.outbox_capacity,
                    "External chat delivery enabled"
                );
                (
                    Arc::new(OutboxChannel::new(outbox.clone())) as Arc<dyn ExternalChannel>,
                    Some(outbox),
                    Some(worker),
                )
            } else {
                info!("External chat delivery disabled");
                (Arc::new(DisabledChannel) as Arc<dyn ExternalChannel>, None, None)
            };

        let dispatcher = Arc::new(Dispatcher::new(
            inbox.clone(),
            directory.clone(),
            directory.clone(),
            channel,
        ));
        let dispatch = DispatchHandler::new(
            dispatcher.clone(),
            bus.subscribe(EventFilter::topics(vec![EventTopic::Lifecycle])),
        );

        let monitor = Arc::new(StaleCaseMonitor::new(
            config.monitor.clone(),
            repository.clone(),
            directory.clone(),
            inbox.clone(),
            dispatcher.clone(),
            clock.clone(),
        ));

        let container = Self {
            clock,
            directory,
            bus,
            catalog,
            cases,
            repository,
            inbox,
            dispatcher,
            monitor,
            chat_outbox,
        };
        let workers = Workers {
            dispatch,
            outbox: outbox_worker,
        };
        Ok((container, workers))
    }

    /// Handler state for the HTTP gateway.
    pub fn app_state(&self) -> AppState {
        let cases: Arc<dyn CaseLifecycleApi> = self.cases.clone();
        let catalog: Arc<dyn EvaluationCatalogApi> = self.catalog.clone();
        let inbox: Arc<dyn NotificationInbox> = self.inbox.clone();
        AppState::new(cases, catalog, inbox)
    }
}
