//! Telegram Bot API transport.
//!
//! `POST {base}/bot{token}/sendMessage` with `chat_id`, `text` and an
//! optional `parse_mode`.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ChatConfig;
use crate::domain::ChatMessage;
use crate::error::{ChannelError, ChannelResult};
use crate::ports::ChatTransport;

#[derive(Debug)]
pub struct TelegramTransport {
    client: reqwest::Client,
    base_url: String,
    token: String,
    destination: String,
}

impl TelegramTransport {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        destination: impl Into<String>,
        timeout: Duration,
    ) -> ChannelResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChannelError::Config(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            destination: destination.into(),
        })
    }

    pub fn from_config(config: &ChatConfig) -> ChannelResult<Self> {
        let token = config
            .bot_token
            .clone()
            .ok_or_else(|| ChannelError::Config("missing bot token".into()))?;
        let destination = config
            .destination
            .clone()
            .ok_or_else(|| ChannelError::Config("missing destination".into()))?;
        Self::new(config.base_url.clone(), token, destination, config.timeout)
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, message: &ChatMessage) -> ChannelResult<()> {
        let mut payload = serde_json::json!({
            "chat_id": self.destination,
            "text": message.text,
        });
        if let Some(mode) = message.parse_mode.api_value() {
            payload["parse_mode"] = serde_json::Value::String(mode.to_string());
        }

        let resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChannelError::Request(format!("timed out: {e}"))
                } else {
                    ChannelError::Request(e.without_url().to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChannelError::Status { status, body });
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ChannelError::Api(format!("unreadable response: {e}")))?;

        if body.get("ok") != Some(&serde_json::Value::Bool(true)) {
            let description = body
                .get("description")
                .and_then(|d| d.as_str())
                .unwrap_or("unknown error");
            return Err(ChannelError::Api(description.to_string()));
        }

        Ok(())
    }
}
