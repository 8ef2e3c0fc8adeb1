//! Telegram Bot API dispatcher.

use crate::scheduling::ports::{DispatchError, MessageDispatcher};
use crate::task::domain::ChatId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the Telegram Bot API.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Bot token issued by `@BotFather`.
    pub bot_token: String,
    /// API root, without trailing slash.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Default public API root.
    pub const DEFAULT_API_BASE: &'static str = "https://api.telegram.org";

    /// Creates settings for `bot_token` against the public API.
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_base: Self::DEFAULT_API_BASE.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages through the Telegram `sendMessage` method.
#[derive(Clone)]
pub struct TelegramDispatcher {
    client: reqwest::Client,
    endpoint: String,
}

impl TelegramDispatcher {
    /// Builds a dispatcher from settings.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &TelegramConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| DispatchError::Transport(err.to_string()))?;
        let endpoint = format!(
            "{}/bot{}/sendMessage",
            config.api_base.trim_end_matches('/'),
            config.bot_token
        );
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl MessageDispatcher for TelegramDispatcher {
    async fn send(&self, recipient: ChatId, text: &str) -> Result<(), DispatchError> {
        let request = SendMessageRequest {
            chat_id: recipient.value(),
            text,
            parse_mode: "Markdown",
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            // Drop the URL: it embeds the bot token.
            .map_err(|err| DispatchError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|err| DispatchError::Transport(err.without_url().to_string()))?;

        if status.is_success() && body.ok {
            return Ok(());
        }
        Err(DispatchError::Rejected {
            recipient,
            reason: body
                .description
                .unwrap_or_else(|| format!("HTTP {status}")),
        })
    }
}
