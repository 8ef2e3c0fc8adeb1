//! Process configuration read once at startup.
//!
//! Components receive the values they need from [`AppConfig`]; nothing reads
//! the environment after startup.

use crate::advisory::adapters::OpenAiConfig;
use crate::scheduling::adapters::TelegramConfig;
use crate::scheduling::services::DeadlineMonitorConfig;
use chrono::TimeDelta;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for the reminder lookahead, one year.
const MAX_LOOKAHEAD_HOURS: u64 = 24 * 365;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent or empty.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A key holds a value that cannot be parsed.
    #[error("invalid value {value:?} for {key}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Every setting the crate's components consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Telegram Bot API settings.
    pub telegram: TelegramConfig,
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Language-model settings; `None` when no API key is configured.
    pub language_model: Option<OpenAiConfig>,
    /// Deadline monitor tuning.
    pub monitor: DeadlineMonitorConfig,
    /// Length of a working day in hours, used by planning prompts.
    pub work_hours: u32,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or a value is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or a value is
    /// malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source(lookup);

        let mut telegram = TelegramConfig::new(source.required("BOT_TOKEN")?);
        if let Some(api_base) = source.optional("TELEGRAM_API_BASE") {
            telegram.api_base = api_base;
        }

        let llm_timeout = Duration::from_secs(source.parsed("LLM_TIMEOUT_SECS", 30)?);
        let language_model = source.optional("OPENAI_API_KEY").map(|api_key| {
            let mut settings = OpenAiConfig::new(api_key);
            if let Some(model) = source.optional("OPENAI_MODEL") {
                settings.model = model;
            }
            if let Some(base_url) = source.optional("OPENAI_BASE_URL") {
                settings.base_url = base_url;
            }
            settings.timeout = llm_timeout;
            settings
        });

        let monitor = DeadlineMonitorConfig {
            interval: Duration::from_secs(source.positive("REMINDER_INTERVAL_SECS", 3600)?),
            lookahead: source.hours("REMINDER_LOOKAHEAD_HOURS", 24, MAX_LOOKAHEAD_HOURS)?,
            urgent_within_hours: source.parsed("REMINDER_URGENT_HOURS", 2)?,
        };

        Ok(Self {
            telegram,
            database_url: source.required("DATABASE_URL")?,
            language_model,
            monitor,
            work_hours: source.parsed("WORK_HOURS", 8)?,
        })
    }
}

struct Source<F>(F);

impl<F> Source<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn parsed<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value })
        })
    }

    fn positive(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        match self.parsed(key, default)? {
            0 => Err(ConfigError::Invalid {
                key,
                value: "0".to_owned(),
            }),
            value => Ok(value),
        }
    }

    fn hours(&self, key: &'static str, default: u64, max: u64) -> Result<TimeDelta, ConfigError> {
        let hours = self.positive(key, default)?;
        i64::try_from(hours)
            .ok()
            .filter(|_| hours <= max)
            .and_then(TimeDelta::try_hours)
            .ok_or_else(|| ConfigError::Invalid {
                key,
                value: hours.to_string(),
            })
    }
}
