use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::adapters::{GoldApiAdapter, JijinhaoAdapter, QingyunkeAdapter};
use crate::config::SourceCredentials;
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::quote_source::{QuoteSource, SourceError, SourceOutcome};
use crate::{CanonicalQuote, ProviderId, QuoteTimestamp};

/// Disposition of one source during a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Accepted,
    Skipped(String),
    Failed(SourceError),
}

/// One entry of the fetch audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAttempt {
    pub source: ProviderId,
    pub outcome: AttemptOutcome,
}

/// Successful fetch.
#[derive(Debug, Clone)]
pub struct FetchSuccess {
    pub quote: CanonicalQuote,
    pub selected_source: ProviderId,
    pub attempts: Vec<SourceAttempt>,
    pub latency_ms: u64,
}

impl FetchSuccess {
    pub fn source_chain(&self) -> Vec<ProviderId> {
        self.attempts.iter().map(|attempt| attempt.source).collect()
    }
}

/// Every source was skipped or failed; no quote is available this run.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub attempts: Vec<SourceAttempt>,
    pub latency_ms: u64,
}

pub type FetchResult = Result<FetchSuccess, FetchFailure>;

/// Single-pass, priority-ordered quote fetcher.
pub struct FallbackFetcher {
    sources: Vec<Arc<dyn QuoteSource>>,
    clock: fn() -> QuoteTimestamp,
}

impl FallbackFetcher {
    pub fn new(sources: Vec<Arc<dyn QuoteSource>>) -> Self {
        Self {
            sources,
            clock: QuoteTimestamp::now,
        }
    }

    /// Replaces the clock used to stamp accepted quotes.
    pub fn with_clock(mut self, clock: fn() -> QuoteTimestamp) -> Self {
        self.clock = clock;
        self
    }

    pub fn sources(&self) -> &[Arc<dyn QuoteSource>] {
        &self.sources
    }

    /// Tries each source in order and returns the first valid quote.
    ///
    /// A reading with a non-positive price counts as a failure of that
    /// source. Sources after the accepted one are never attempted.
    pub async fn fetch(&self) -> FetchResult {
        let started = Instant::now();
        let mut attempts = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let provider = source.id();
            info!(source = %provider, "trying gold price source");

            let outcome = match source.attempt().await {
                SourceOutcome::Quoted(reading) => {
                    match CanonicalQuote::accept(reading, (self.clock)()) {
                        Ok(quote) => {
                            info!(
                                source = %provider,
                                price = quote.price,
                                currency = %quote.currency,
                                unit = %quote.unit,
                                "quote accepted"
                            );
                            attempts.push(SourceAttempt {
                                source: provider,
                                outcome: AttemptOutcome::Accepted,
                            });
                            return Ok(FetchSuccess {
                                quote,
                                selected_source: provider,
                                attempts,
                                latency_ms: elapsed_ms(started),
                            });
                        }
                        Err(error) => AttemptOutcome::Failed(SourceError::invalid_price(format!(
                            "{provider} reading rejected: {error}"
                        ))),
                    }
                }
                SourceOutcome::Skipped(reason) => AttemptOutcome::Skipped(reason),
                SourceOutcome::Failed(error) => AttemptOutcome::Failed(error),
            };

            match &outcome {
                AttemptOutcome::Skipped(reason) => {
                    info!(source = %provider, reason = %reason, "source skipped");
                }
                AttemptOutcome::Failed(error) => {
                    warn!(source = %provider, error = %error, "source failed");
                }
                AttemptOutcome::Accepted => {}
            }

            attempts.push(SourceAttempt {
                source: provider,
                outcome,
            });
        }

        warn!(attempted = attempts.len(), "all gold price sources failed");
        Err(FetchFailure {
            attempts,
            latency_ms: elapsed_ms(started),
        })
    }
}

/// Builder for the production fetcher.
///
/// Credentials are passed in explicitly; the builder never reads the
/// environment.
///
/// ```rust,ignore
/// use goldwatch_core::{FallbackFetcherBuilder, ProviderId, SourceCredentials};
///
/// let fetcher = FallbackFetcherBuilder::new()
///     .with_credentials(SourceCredentials::new(Some(token)))
///     .with_priority(vec![ProviderId::Jijinhao, ProviderId::GoldApi])
///     .build();
/// ```
pub struct FallbackFetcherBuilder {
    credentials: SourceCredentials,
    http_client: Option<Arc<dyn HttpClient>>,
    priority: Vec<ProviderId>,
    timeout_ms: u64,
}

impl Default for FallbackFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackFetcherBuilder {
    pub fn new() -> Self {
        Self {
            credentials: SourceCredentials::default(),
            http_client: None,
            priority: ProviderId::ALL.to_vec(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_credentials(mut self, credentials: SourceCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Sets the fallback order. Duplicates are dropped; an empty list keeps
    /// the default order.
    pub fn with_priority(mut self, priority: Vec<ProviderId>) -> Self {
        if !priority.is_empty() {
            self.priority = dedupe_chain(&priority);
        }
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn build(self) -> FallbackFetcher {
        let http_client = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));

        let sources = self
            .priority
            .iter()
            .map(|provider| -> Arc<dyn QuoteSource> {
                match provider {
                    ProviderId::GoldApi => Arc::new(
                        GoldApiAdapter::new(
                            Arc::clone(&http_client),
                            self.credentials.goldapi_token.clone(),
                        )
                        .with_timeout_ms(self.timeout_ms),
                    ),
                    ProviderId::Jijinhao => Arc::new(
                        JijinhaoAdapter::new(Arc::clone(&http_client))
                            .with_timeout_ms(self.timeout_ms),
                    ),
                    ProviderId::Qingyunke => Arc::new(
                        QingyunkeAdapter::new(Arc::clone(&http_client))
                            .with_timeout_ms(self.timeout_ms),
                    ),
                }
            })
            .collect();

        FallbackFetcher::new(sources)
    }
}

fn dedupe_chain(chain: &[ProviderId]) -> Vec<ProviderId> {
    let mut seen = HashSet::new();
    let mut output = Vec::with_capacity(chain.len());

    for provider in chain {
        if seen.insert(*provider) {
            output.push(*provider);
        }
    }

    output
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
