//! Explicit runtime configuration.
//!
//! The core never reads the process environment. The CLI resolves
//! credentials and paths once and passes these values to the constructors.

use std::path::PathBuf;

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::ProviderId;

pub const DEFAULT_HISTORY_FILE: &str = "gold_history.json";

/// Credentials consumed by quote sources.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SourceCredentials {
    pub goldapi_token: Option<String>,
}

impl SourceCredentials {
    pub fn new(goldapi_token: Option<String>) -> Self {
        Self { goldapi_token }
    }
}

impl std::fmt::Debug for SourceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCredentials")
            .field("goldapi_token", &self.goldapi_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Telegram bot credentials. Only constructible when both parts are present.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    bot_token: String,
    chat_id: String,
}

impl TelegramCredentials {
    /// Returns `None` when either value is missing or blank.
    pub fn from_parts(bot_token: Option<String>, chat_id: Option<String>) -> Option<Self> {
        let bot_token = non_blank(bot_token)?;
        let chat_id = non_blank(chat_id)?;
        Some(Self { bot_token, chat_id })
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

impl std::fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Everything one monitor run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub sources: SourceCredentials,
    pub telegram: Option<TelegramCredentials>,
    pub priority: Vec<ProviderId>,
    pub history_path: PathBuf,
    pub history_capacity: usize,
    pub timeout_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sources: SourceCredentials::default(),
            telegram: None,
            priority: ProviderId::ALL.to_vec(),
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
