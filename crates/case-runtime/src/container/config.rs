//! # Runtime Configuration
//!
//! Unified configuration for all subsystems, read from `CW_*` environment
//! variables on top of the defaults.
//!
//! Invalid values abort startup; nothing falls back silently.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cw_01_case_lifecycle::{LifecycleConfig, RequesterFallback};
use cw_02_evaluation_catalog::DEFAULT_CACHE_TTL;
use cw_05_chat_channel::{ChannelError, ChatConfig, ParseMode};
use cw_06_stale_monitor::{MonitorConfig, MonitorError};
use cw_07_api_gateway::{GatewayConfig, GatewayError};
use shared_types::PersonId;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set to something unparseable.
    #[error("{var}: invalid value {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Chat configuration: {0}")]
    Chat(#[from] ChannelError),

    #[error("Monitor configuration: {0}")]
    Monitor(#[from] MonitorError),
}

/// Catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// How long option lists are served from cache. Zero disables caching.
    pub cache_ttl: Duration,
    /// Seed the built-in scales when a pair has no config.
    pub seed_defaults: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            seed_defaults: true,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// HTTP gateway.
    pub gateway: GatewayConfig,
    /// Case lifecycle (requester fallback).
    pub lifecycle: LifecycleConfig,
    /// Evaluation catalog.
    pub catalog: CatalogConfig,
    /// External chat delivery.
    pub chat: ChatConfig,
    /// Stale case monitor.
    pub monitor: MonitorConfig,
    /// JSON seed of persons and users for the in-memory directory.
    pub directory_file: Option<PathBuf>,
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value }),
    }
}

/// `first` opts into the first directory person; a uuid names a person.
fn parse_fallback(value: String) -> Result<RequesterFallback, ConfigError> {
    if value.trim().eq_ignore_ascii_case("first") {
        return Ok(RequesterFallback::FirstAvailable);
    }
    parse::<PersonId>("CW_DEFAULT_REQUESTER_ID", value).map(RequesterFallback::Person)
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, then validate it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            gateway: GatewayConfig::from_lookup(&lookup)?,
            ..Self::default()
        };

        // Monitor
        if let Some(v) = lookup("CW_STALE_THRESHOLD_HOURS") {
            config.monitor.threshold =
                chrono::Duration::hours(parse("CW_STALE_THRESHOLD_HOURS", v)?);
        }
        if let Some(v) = lookup("CW_STALE_SCAN_INTERVAL_SECS") {
            config.monitor.interval = Duration::from_secs(parse("CW_STALE_SCAN_INTERVAL_SECS", v)?);
        }

        // Chat
        if let Some(v) = lookup("CW_CHAT_ENABLED") {
            config.chat.enabled = parse_bool("CW_CHAT_ENABLED", v)?;
        }
        if let Some(v) = lookup("CW_CHAT_BASE_URL") {
            config.chat.base_url = v;
        }
        config.chat.bot_token = lookup("CW_CHAT_BOT_TOKEN").filter(|v| !v.is_empty());
        config.chat.destination = lookup("CW_CHAT_DESTINATION").filter(|v| !v.is_empty());
        if let Some(v) = lookup("CW_CHAT_PARSE_MODE") {
            config.chat.parse_mode = parse::<ParseMode>("CW_CHAT_PARSE_MODE", v)?;
        }
        if let Some(v) = lookup("CW_CHAT_TIMEOUT_SECS") {
            config.chat.timeout = Duration::from_secs(parse("CW_CHAT_TIMEOUT_SECS", v)?);
        }
        if let Some(v) = lookup("CW_OUTBOX_CAPACITY") {
            config.chat.outbox_capacity = parse("CW_OUTBOX_CAPACITY", v)?;
        }

        // Catalog
        if let Some(v) = lookup("CW_CATALOG_CACHE_TTL_SECS") {
            config.catalog.cache_ttl = Duration::from_secs(parse("CW_CATALOG_CACHE_TTL_SECS", v)?);
        }
        if let Some(v) = lookup("CW_SEED_DEFAULT_SCALES") {
            config.catalog.seed_defaults = parse_bool("CW_SEED_DEFAULT_SCALES", v)?;
        }

        // Lifecycle
        if let Some(v) = lookup("CW_DEFAULT_REQUESTER_ID").filter(|v| !v.trim().is_empty()) {
            config.lifecycle.requester_fallback = parse_fallback(v)?;
        }

        config.directory_file = lookup("CW_DIRECTORY_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        self.chat.validate()?;
        self.monitor.validate()?;
        Ok(())
    }
}
