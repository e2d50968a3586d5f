use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::quote_source::{AttemptFuture, QuoteSource, SourceError};
use crate::{PriceReading, ProviderId};

pub const QINGYUNKE_ENDPOINT: &str = "https://api.qingyunke.com/api.php";

const QUERY_MESSAGE: &str = "黄金价格";

/// Zero-based index of the price token in the chat-bot reply.
const PRICE_TOKEN_INDEX: usize = 3;

/// qingyunke chat-bot API, asked for the gold price in free text.
///
/// The reply is a sentence whose fourth space-separated token is the USD
/// price per ounce.
#[derive(Clone)]
pub struct QingyunkeAdapter {
    http_client: Arc<dyn HttpClient>,
    endpoint: String,
    timeout_ms: u64,
}

impl QingyunkeAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            endpoint: String::from(QINGYUNKE_ENDPOINT),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}?key=free&appid=0&msg={}",
            self.endpoint,
            urlencoding::encode(QUERY_MESSAGE)
        )
    }

    async fn fetch(&self) -> Result<PriceReading, SourceError> {
        let request = HttpRequest::get(self.request_url()).with_timeout_ms(self.timeout_ms);
        let payload: QingyunkePayload =
            super::fetch_json(self.http_client.as_ref(), ProviderId::Qingyunke, request).await?;

        let content = payload.content.unwrap_or_else(|| String::from("0"));
        let price = parse_price_token(&content)?;
        Ok(PriceReading::new(ProviderId::Qingyunke, price, "USD", "美元/盎司"))
    }
}

impl QuoteSource for QingyunkeAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Qingyunke
    }

    fn attempt(&self) -> AttemptFuture<'_> {
        Box::pin(async move { self.fetch().await.into() })
    }
}

fn parse_price_token(content: &str) -> Result<f64, SourceError> {
    let token = content.split(' ').nth(PRICE_TOKEN_INDEX).ok_or_else(|| {
        SourceError::invalid_response(format!(
            "qingyunke reply has no price token: '{content}'"
        ))
    })?;

    token.trim().parse::<f64>().map_err(|e| {
        SourceError::invalid_response(format!("qingyunke price token '{token}' is not a number: {e}"))
    })
}

#[derive(Debug, Deserialize)]
struct QingyunkePayload {
    #[serde(default)]
    content: Option<String>,
}
