use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::quote_source::{AttemptFuture, QuoteSource, SourceError};
use crate::{PriceReading, ProviderId};

pub const JIJINHAO_ENDPOINT: &str =
    "https://api.jijinhao.com/quoteCenter/realPrice.htm?code=GOLD_CNY";

/// cngold.org (jijinhao) domestic gold price in CNY per gram.
#[derive(Clone)]
pub struct JijinhaoAdapter {
    http_client: Arc<dyn HttpClient>,
    endpoint: String,
    timeout_ms: u64,
}

impl JijinhaoAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            endpoint: String::from(JIJINHAO_ENDPOINT),
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

    async fn fetch(&self) -> Result<PriceReading, SourceError> {
        let request = HttpRequest::get(&self.endpoint).with_timeout_ms(self.timeout_ms);
        let payload: JijinhaoPayload =
            super::fetch_json(self.http_client.as_ref(), ProviderId::Jijinhao, request).await?;

        let price = payload.data.and_then(|data| data.price).unwrap_or(0.0);
        Ok(PriceReading::new(ProviderId::Jijinhao, price, "CNY", "元/克"))
    }
}

impl QuoteSource for JijinhaoAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Jijinhao
    }

    fn attempt(&self) -> AttemptFuture<'_> {
        Box::pin(async move { self.fetch().await.into() })
    }
}

#[derive(Debug, Deserialize)]
struct JijinhaoPayload {
    #[serde(default)]
    data: Option<JijinhaoData>,
}

#[derive(Debug, Deserialize)]
struct JijinhaoData {
    #[serde(default)]
    price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{CannedHttpClient, HttpError, HttpResponse};
    use crate::quote_source::{SourceErrorKind, SourceOutcome};

    #[tokio::test]
    async fn parses_nested_price() {
        let client = Arc::new(CannedHttpClient::new().respond(
            JIJINHAO_ENDPOINT,
            HttpResponse::ok_json(r#"{"code":0,"data":{"price":563.82,"name":"AuT+D"}}"#),
        ));
        let adapter = JijinhaoAdapter::new(client);

        let outcome = adapter.attempt().await;

        let SourceOutcome::Quoted(reading) = outcome else {
            panic!("expected a reading, got {outcome:?}");
        };
        assert_eq!(reading.price, 563.82);
        assert_eq!(reading.currency, "CNY");
        assert_eq!(reading.unit, "元/克");
    }

    #[tokio::test]
    async fn missing_data_block_yields_zero_price() {
        let client = Arc::new(
            CannedHttpClient::new().respond(JIJINHAO_ENDPOINT, HttpResponse::ok_json(r#"{"code":1}"#)),
        );
        let adapter = JijinhaoAdapter::new(client);

        assert!(matches!(
            adapter.attempt().await,
            SourceOutcome::Quoted(ref r) if r.price == 0.0
        ));
    }

    #[tokio::test]
    async fn html_body_is_invalid_response() {
        let client = Arc::new(CannedHttpClient::new().respond(
            JIJINHAO_ENDPOINT,
            HttpResponse::ok_json("<html>maintenance</html>"),
        ));
        let adapter = JijinhaoAdapter::new(client);

        let outcome = adapter.attempt().await;

        assert!(matches!(
            outcome,
            SourceOutcome::Failed(ref e) if e.kind() == SourceErrorKind::InvalidResponse
        ));
    }

    #[tokio::test]
    async fn timeout_is_unavailable() {
        let client = Arc::new(
            CannedHttpClient::new().fail(JIJINHAO_ENDPOINT, HttpError::new("request timeout")),
        );
        let adapter = JijinhaoAdapter::new(client);

        let outcome = adapter.attempt().await;

        assert!(matches!(
            outcome,
            SourceOutcome::Failed(ref e) if e.kind() == SourceErrorKind::Unavailable
        ));
    }
}
