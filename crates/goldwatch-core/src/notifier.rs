use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::TelegramCredentials;
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{CanonicalQuote, NotifyError};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Result of a best-effort notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No credentials configured; nothing was sent.
    Skipped,
    Delivered,
    Failed(NotifyError),
}

/// Renders the Markdown message posted for a quote.
pub fn render_message(quote: &CanonicalQuote) -> String {
    format!(
        "🟡 *实时金价监控*\n\
         ━━━━━━━━━━━━━━\n\
         💰 价格：*{price}* {currency}\n\
         📊 单位：{unit}\n\
         🕐 时间：{timestamp}\n\
         📡 来源：{source}\n\
         ━━━━━━━━━━━━━━\n\
         自动监控 • 每小时更新",
        price = quote.price,
        currency = quote.currency,
        unit = quote.unit,
        timestamp = quote.timestamp,
        source = quote.source,
    )
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Posts quotes to a Telegram chat through the Bot API.
pub struct TelegramNotifier {
    http_client: Arc<dyn HttpClient>,
    credentials: Option<TelegramCredentials>,
    api_base: String,
    timeout_ms: u64,
}

impl TelegramNotifier {
    pub fn new(http_client: Arc<dyn HttpClient>, credentials: Option<TelegramCredentials>) -> Self {
        Self {
            http_client,
            credentials,
            api_base: String::from(TELEGRAM_API_BASE),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Sends one message for `quote`. Never returns an error to the caller.
    pub async fn notify(&self, quote: &CanonicalQuote) -> NotifyOutcome {
        let Some(credentials) = &self.credentials else {
            info!("telegram bot not configured, skipping notification");
            return NotifyOutcome::Skipped;
        };

        match self.send(credentials, quote).await {
            Ok(()) => {
                info!(chat_id = %credentials.chat_id(), "telegram notification sent");
                NotifyOutcome::Delivered
            }
            Err(error) => {
                warn!(error = %error, "telegram notification failed");
                NotifyOutcome::Failed(error)
            }
        }
    }

    async fn send(
        &self,
        credentials: &TelegramCredentials,
        quote: &CanonicalQuote,
    ) -> Result<(), NotifyError> {
        let text = render_message(quote);
        let body = serde_json::to_string(&SendMessage {
            chat_id: credentials.chat_id(),
            text: &text,
            parse_mode: "Markdown",
        })
        .map_err(|e| NotifyError::Serialization(e.to_string()))?;

        let url = format!("{}/bot{}/sendMessage", self.api_base, credentials.bot_token());
        let request = HttpRequest::post(url)
            .with_json_body(body)
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| NotifyError::Transport(e.message().to_owned()))?;

        if !response.is_success() {
            return Err(NotifyError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}
