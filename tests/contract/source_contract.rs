use std::sync::Arc;

use goldwatch_core::adapters::{GOLDAPI_ENDPOINT, JIJINHAO_ENDPOINT, QINGYUNKE_ENDPOINT};
use goldwatch_core::{
    CannedHttpClient, GoldApiAdapter, HttpError, HttpMethod, HttpResponse, JijinhaoAdapter,
    ProviderId, QingyunkeAdapter, QuoteSource, SourceErrorKind, SourceOutcome,
};

struct SourceCase {
    id: ProviderId,
    url_prefix: &'static str,
    ok_body: &'static str,
    expected_price: f64,
    expected_currency: &'static str,
    expected_unit: &'static str,
}

fn source_cases() -> Vec<SourceCase> {
    vec![
        SourceCase {
            id: ProviderId::GoldApi,
            url_prefix: GOLDAPI_ENDPOINT,
            ok_body: r#"{"timestamp":1717000000,"metal":"XAU","currency":"USD","price":2345.5}"#,
            expected_price: 2345.5,
            expected_currency: "USD",
            expected_unit: "per ounce",
        },
        SourceCase {
            id: ProviderId::Jijinhao,
            url_prefix: JIJINHAO_ENDPOINT,
            ok_body: r#"{"data":{"price":566.2}}"#,
            expected_price: 566.2,
            expected_currency: "CNY",
            expected_unit: "元/克",
        },
        SourceCase {
            id: ProviderId::Qingyunke,
            url_prefix: QINGYUNKE_ENDPOINT,
            ok_body: r#"{"result":0,"content":"current gold price 2345.5 USD"}"#,
            expected_price: 2345.5,
            expected_currency: "USD",
            expected_unit: "美元/盎司",
        },
    ]
}

fn source_for(id: ProviderId, client: Arc<CannedHttpClient>) -> Arc<dyn QuoteSource> {
    match id {
        ProviderId::GoldApi => Arc::new(GoldApiAdapter::new(client, Some(String::from("token")))),
        ProviderId::Jijinhao => Arc::new(JijinhaoAdapter::new(client)),
        ProviderId::Qingyunke => Arc::new(QingyunkeAdapter::new(client)),
    }
}

#[tokio::test]
async fn well_formed_payload_maps_to_documented_reading_for_all_sources() {
    for case in source_cases() {
        let client = Arc::new(
            CannedHttpClient::new().respond(case.url_prefix, HttpResponse::ok_json(case.ok_body)),
        );
        let source = source_for(case.id, client.clone());

        assert_eq!(source.id(), case.id);
        let outcome = source.attempt().await;
        let SourceOutcome::Quoted(reading) = outcome else {
            panic!("source '{}' failed: {outcome:?}", case.id);
        };

        assert_eq!(reading.price, case.expected_price, "source '{}': price", case.id);
        assert_eq!(reading.currency, case.expected_currency, "source '{}': currency", case.id);
        assert_eq!(reading.unit, case.expected_unit, "source '{}': unit", case.id);
        assert_eq!(reading.source, case.id.label(), "source '{}': label", case.id);

        let requests = client.requests();
        assert_eq!(requests.len(), 1, "source '{}': one request", case.id);
        assert_eq!(requests[0].method, HttpMethod::Get, "source '{}': GET", case.id);
        assert_eq!(requests[0].timeout_ms, 10_000, "source '{}': timeout", case.id);
    }
}

#[tokio::test]
async fn non_success_status_is_unavailable_for_all_sources() {
    for case in source_cases() {
        let client = Arc::new(
            CannedHttpClient::new().respond(case.url_prefix, HttpResponse::new(500, case.ok_body)),
        );
        let source = source_for(case.id, client);

        let outcome = source.attempt().await;
        assert!(
            matches!(outcome, SourceOutcome::Failed(ref e) if e.kind() == SourceErrorKind::Unavailable),
            "source '{}': {outcome:?}",
            case.id
        );
    }
}

#[tokio::test]
async fn transport_error_is_unavailable_for_all_sources() {
    for case in source_cases() {
        let client = Arc::new(
            CannedHttpClient::new().fail(case.url_prefix, HttpError::new("request timeout")),
        );
        let source = source_for(case.id, client);

        let outcome = source.attempt().await;
        assert!(
            matches!(outcome, SourceOutcome::Failed(ref e) if e.message().contains("request timeout")),
            "source '{}': {outcome:?}",
            case.id
        );
    }
}

#[tokio::test]
async fn malformed_body_is_invalid_response_for_all_sources() {
    for case in source_cases() {
        let client = Arc::new(
            CannedHttpClient::new().respond(case.url_prefix, HttpResponse::ok_json("{\"price\":")),
        );
        let source = source_for(case.id, client);

        let outcome = source.attempt().await;
        assert!(
            matches!(outcome, SourceOutcome::Failed(ref e) if e.kind() == SourceErrorKind::InvalidResponse),
            "source '{}': {outcome:?}",
            case.id
        );
    }
}

#[test]
fn only_goldapi_requires_a_credential() {
    let client = Arc::new(CannedHttpClient::new());
    for id in ProviderId::ALL {
        let source = source_for(id, client.clone());
        assert_eq!(source.requires_credential(), id == ProviderId::GoldApi);
        assert!(source.is_ready(), "source '{id}' should be ready");
    }
}

#[tokio::test]
async fn endpoint_override_redirects_every_source() {
    const MIRROR: &str = "http://mirror.test/gold";
    for case in source_cases() {
        let client = Arc::new(
            CannedHttpClient::new().respond(MIRROR, HttpResponse::ok_json(case.ok_body)),
        );
        let source: Arc<dyn QuoteSource> = match case.id {
            ProviderId::GoldApi => Arc::new(
                GoldApiAdapter::new(client.clone(), Some(String::from("token")))
                    .with_endpoint(MIRROR),
            ),
            ProviderId::Jijinhao => {
                Arc::new(JijinhaoAdapter::new(client.clone()).with_endpoint(MIRROR))
            }
            ProviderId::Qingyunke => {
                Arc::new(QingyunkeAdapter::new(client.clone()).with_endpoint(MIRROR))
            }
        };

        let outcome = source.attempt().await;

        assert!(
            matches!(outcome, SourceOutcome::Quoted(ref r) if r.price == case.expected_price),
            "source '{}': {outcome:?}",
            case.id
        );
        let requests = client.requests();
        assert_eq!(requests.len(), 1, "source '{}': one request", case.id);
        assert!(
            requests[0].url.starts_with(MIRROR),
            "source '{}': {}",
            case.id,
            requests[0].url
        );
    }
}
