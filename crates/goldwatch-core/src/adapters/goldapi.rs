use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::quote_source::{AttemptFuture, QuoteSource, SourceError, SourceOutcome};
use crate::{PriceReading, ProviderId};

pub const GOLDAPI_ENDPOINT: &str = "https://www.goldapi.io/api/XAU/USD";

/// Sample token shipped in setup docs; treated the same as no token.
pub const GOLDAPI_TOKEN_PLACEHOLDER: &str = "goldapi-your-token-here";

/// Returns true when `token` is present, non-blank and not the placeholder.
pub fn is_configured_token(token: Option<&str>) -> bool {
    match token.map(str::trim) {
        Some(token) => !token.is_empty() && token != GOLDAPI_TOKEN_PLACEHOLDER,
        None => false,
    }
}

/// goldapi.io XAU/USD spot quote. Requires an access token.
#[derive(Clone)]
pub struct GoldApiAdapter {
    http_client: Arc<dyn HttpClient>,
    token: Option<String>,
    endpoint: String,
    timeout_ms: u64,
}

impl GoldApiAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, token: Option<String>) -> Self {
        Self {
            http_client,
            token,
            endpoint: String::from(GOLDAPI_ENDPOINT),
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

    fn configured_token(&self) -> Option<&str> {
        let token = self.token.as_deref();
        if is_configured_token(token) {
            token.map(str::trim)
        } else {
            None
        }
    }

    async fn fetch(&self, token: &str) -> Result<PriceReading, SourceError> {
        let request = HttpRequest::get(&self.endpoint)
            .with_header("x-access-token", token)
            .with_header("content-type", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let payload: GoldApiPayload =
            super::fetch_json(self.http_client.as_ref(), ProviderId::GoldApi, request).await?;

        Ok(PriceReading::new(
            ProviderId::GoldApi,
            payload.price.unwrap_or(0.0),
            "USD",
            "per ounce",
        ))
    }
}

impl QuoteSource for GoldApiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::GoldApi
    }

    fn requires_credential(&self) -> bool {
        true
    }

    fn is_ready(&self) -> bool {
        self.configured_token().is_some()
    }

    fn attempt(&self) -> AttemptFuture<'_> {
        Box::pin(async move {
            let Some(token) = self.configured_token() else {
                return SourceOutcome::Skipped(String::from("no GoldAPI token configured"));
            };
            self.fetch(token).await.into()
        })
    }
}

#[derive(Debug, Deserialize)]
struct GoldApiPayload {
    #[serde(default)]
    price: Option<f64>,
}
