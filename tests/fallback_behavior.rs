//! Behavior-driven tests for the fallback fetch
//!
//! These tests verify HOW the fetcher walks its sources: strictly in order,
//! stopping at the first valid quote and never raising when all sources fail.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use goldwatch_core::{
    quote_source::AttemptFuture, AttemptOutcome, FallbackFetcher, PriceReading, ProviderId,
    QuoteSource, QuoteTimestamp, SourceError, SourceErrorKind, SourceOutcome,
};

struct ScriptedSource {
    id: ProviderId,
    outcome: SourceOutcome,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn quoted(id: ProviderId, price: f64, currency: &str) -> Arc<Self> {
        Self::with_outcome(
            id,
            SourceOutcome::Quoted(PriceReading::new(id, price, currency, "per ounce")),
        )
    }

    fn failing(id: ProviderId) -> Arc<Self> {
        Self::with_outcome(
            id,
            SourceOutcome::Failed(SourceError::unavailable("connection reset")),
        )
    }

    fn skipped(id: ProviderId) -> Arc<Self> {
        Self::with_outcome(id, SourceOutcome::Skipped(String::from("no token")))
    }

    fn with_outcome(id: ProviderId, outcome: SourceOutcome) -> Arc<Self> {
        Arc::new(Self {
            id,
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuoteSource for ScriptedSource {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn attempt(&self) -> AttemptFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

fn as_sources(sources: &[Arc<ScriptedSource>]) -> Vec<Arc<dyn QuoteSource>> {
    sources
        .iter()
        .map(|source| Arc::clone(source) as Arc<dyn QuoteSource>)
        .collect()
}

fn fixed_clock() -> QuoteTimestamp {
    QuoteTimestamp::parse("2024-07-15 10:00:00").expect("valid timestamp")
}

// =============================================================================
// Fallback: first success wins
// =============================================================================

#[tokio::test]
async fn when_first_source_fails_second_source_quote_is_returned_and_third_never_called() {
    // Given: A fails, B answers 1950.5 USD, C would be skipped
    let a = ScriptedSource::failing(ProviderId::GoldApi);
    let b = ScriptedSource::quoted(ProviderId::Jijinhao, 1950.5, "USD");
    let c = ScriptedSource::skipped(ProviderId::Qingyunke);
    let fetcher = FallbackFetcher::new(as_sources(&[a.clone(), b.clone(), c.clone()]))
        .with_clock(fixed_clock);

    // When: The fetcher runs
    let success = fetcher.fetch().await.expect("B should provide the quote");

    // Then: B's quote is returned, stamped once, and C is never invoked
    assert_eq!(success.selected_source, ProviderId::Jijinhao);
    assert_eq!(success.quote.price, 1950.5);
    assert_eq!(success.quote.currency, "USD");
    assert_eq!(success.quote.source, "金投网");
    assert_eq!(success.quote.timestamp, fixed_clock());
    assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 0));
    assert_eq!(
        success.source_chain(),
        vec![ProviderId::GoldApi, ProviderId::Jijinhao]
    );
    assert_eq!(success.attempts[1].outcome, AttemptOutcome::Accepted);
}

#[tokio::test]
async fn when_first_source_succeeds_no_other_source_is_attempted() {
    // Given: Every source would answer
    let a = ScriptedSource::quoted(ProviderId::GoldApi, 2301.0, "USD");
    let b = ScriptedSource::quoted(ProviderId::Jijinhao, 560.0, "CNY");
    let fetcher = FallbackFetcher::new(as_sources(&[a.clone(), b.clone()]));

    // When: The fetcher runs
    let success = fetcher.fetch().await.expect("first source answers");

    // Then: Only the first one was called
    assert_eq!(success.selected_source, ProviderId::GoldApi);
    assert_eq!(b.calls(), 0);
}

// =============================================================================
// Fallback: non-positive prices are failures
// =============================================================================

#[tokio::test]
async fn when_a_source_reports_non_positive_price_fetcher_moves_on() {
    for bad_price in [0.0, -12.5] {
        // Given: The first source reports a non-positive price
        let a = ScriptedSource::quoted(ProviderId::GoldApi, bad_price, "USD");
        let b = ScriptedSource::quoted(ProviderId::Qingyunke, 2318.45, "USD");
        let fetcher = FallbackFetcher::new(as_sources(&[a.clone(), b.clone()]));

        // When: The fetcher runs
        let success = fetcher.fetch().await.expect("second source answers");

        // Then: The first reading is recorded as an invalid-price failure
        assert_eq!(success.selected_source, ProviderId::Qingyunke);
        let AttemptOutcome::Failed(error) = &success.attempts[0].outcome else {
            panic!("price {bad_price} must count as failure");
        };
        assert_eq!(error.kind(), SourceErrorKind::InvalidPrice);
    }
}

#[tokio::test]
async fn when_only_source_reports_zero_price_no_quote_is_returned() {
    // Given: A single source reporting zero
    let fetcher = FallbackFetcher::new(as_sources(&[ScriptedSource::quoted(
        ProviderId::Jijinhao,
        0.0,
        "CNY",
    )]));

    // When/Then: The fetch reports no quote
    let failure = fetcher.fetch().await.expect_err("zero is not a price");
    assert_eq!(failure.attempts.len(), 1);
}

// =============================================================================
// Fallback: exhaustion
// =============================================================================

#[tokio::test]
async fn when_every_source_fails_or_skips_fetch_reports_no_quote() {
    // Given: All sources are unusable
    let sources = vec![
        ScriptedSource::skipped(ProviderId::GoldApi),
        ScriptedSource::failing(ProviderId::Jijinhao),
        ScriptedSource::failing(ProviderId::Qingyunke),
    ];
    let fetcher = FallbackFetcher::new(as_sources(&sources));

    // When: The fetcher runs
    let failure = fetcher.fetch().await.expect_err("no source can answer");

    // Then: Every source was tried exactly once, in order
    let tried: Vec<_> = failure.attempts.iter().map(|a| a.source).collect();
    assert_eq!(tried, ProviderId::ALL.to_vec());
    assert!(sources.iter().all(|s| s.calls() == 1));
    assert!(matches!(failure.attempts[0].outcome, AttemptOutcome::Skipped(_)));
}

#[tokio::test]
async fn when_no_sources_are_configured_fetch_reports_no_quote() {
    let fetcher = FallbackFetcher::new(Vec::new());

    let failure = fetcher.fetch().await.expect_err("nothing to try");

    assert!(failure.attempts.is_empty());
}
