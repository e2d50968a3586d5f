mod goldapi;
mod jijinhao;
mod qingyunke;

pub use goldapi::{is_configured_token, GoldApiAdapter, GOLDAPI_ENDPOINT, GOLDAPI_TOKEN_PLACEHOLDER};
pub use jijinhao::{JijinhaoAdapter, JIJINHAO_ENDPOINT};
pub use qingyunke::{QingyunkeAdapter, QINGYUNKE_ENDPOINT};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http_client::{HttpClient, HttpRequest};
use crate::quote_source::SourceError;
use crate::ProviderId;

/// Executes a feed request and decodes a successful JSON body.
async fn fetch_json<T>(
    http_client: &dyn HttpClient,
    provider: ProviderId,
    request: HttpRequest,
) -> Result<T, SourceError>
where
    T: DeserializeOwned,
{
    debug!(source = %provider, url = %request.url, timeout_ms = request.timeout_ms, "sending feed request");

    let response = http_client.execute(request).await.map_err(|e| {
        SourceError::unavailable(format!("{provider} transport error: {}", e.message()))
    })?;

    if !response.is_success() {
        return Err(SourceError::unavailable(format!(
            "{provider} returned status {}",
            response.status
        )));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        SourceError::invalid_response(format!("failed to parse {provider} response: {e}"))
    })
}
