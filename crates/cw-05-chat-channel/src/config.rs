//! Chat channel configuration.

use std::time::Duration;

use crate::domain::ParseMode;
use crate::error::{ChannelError, ChannelResult};

pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// When false, events are not delivered anywhere.
    pub enabled: bool,
    pub base_url: String,
    pub bot_token: Option<String>,
    /// Fixed destination id for every message.
    pub destination: Option<String>,
    pub parse_mode: ParseMode,
    /// Bound on one outbound call.
    pub timeout: Duration,
    /// Queued messages before new ones are dropped.
    pub outbox_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            bot_token: None,
            destination: None,
            parse_mode: ParseMode::Html,
            timeout: Duration::from_secs(5),
            outbox_capacity: 256,
        }
    }
}

impl ChatConfig {
    pub fn validate(&self) -> ChannelResult<()> {
        if self.timeout.is_zero() {
            return Err(ChannelError::Config("timeout must be non-zero".into()));
        }
        if self.outbox_capacity == 0 {
            return Err(ChannelError::Config("outbox capacity must be non-zero".into()));
        }
        if !self.enabled {
            return Ok(());
        }
        if self.bot_token.as_deref().map_or(true, str::is_empty) {
            return Err(ChannelError::Config("bot token is required when chat is enabled".into()));
        }
        if self.destination.as_deref().map_or(true, str::is_empty) {
            return Err(ChannelError::Config("destination is required when chat is enabled".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_needs_no_credentials() {
        assert!(ChatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_enabled_needs_credentials() {
        let mut config = ChatConfig {
            enabled: true,
            ..ChatConfig::default()
        };
        assert!(config.validate().is_err());

        config.bot_token = Some("123:abc".into());
        assert!(config.validate().is_err());

        config.destination = Some("-100200".into());
        assert!(config.validate().is_ok());

        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
