use std::sync::Arc;

use tracing::{info, warn};

use crate::config::MonitorConfig;
use crate::history::HistoryStore;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::notifier::{NotifyOutcome, TelegramNotifier};
use crate::routing::{FallbackFetcher, FallbackFetcherBuilder, SourceAttempt};
use crate::{CanonicalQuote, HistoryError, ProviderId};

/// Summary of one monitor run.
#[derive(Debug)]
pub struct RunReport {
    pub quote: Option<CanonicalQuote>,
    pub selected_source: Option<ProviderId>,
    pub attempts: Vec<SourceAttempt>,
    /// Wall time spent in the fallback pass.
    pub fetch_latency_ms: u64,
    /// `None` when no quote was fetched.
    pub notification: Option<NotifyOutcome>,
    /// Number of entries persisted, or the save error. `None` when no quote was fetched.
    pub history: Option<Result<usize, HistoryError>>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.quote.is_some()
    }
}

/// One fetch, notify and record cycle.
pub struct GoldMonitor {
    fetcher: FallbackFetcher,
    notifier: TelegramNotifier,
    history: HistoryStore,
}

impl GoldMonitor {
    pub fn new(fetcher: FallbackFetcher, notifier: TelegramNotifier, history: HistoryStore) -> Self {
        Self {
            fetcher,
            notifier,
            history,
        }
    }

    /// Wires the production components from `config` over a real HTTP client.
    pub fn from_config(config: MonitorConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: MonitorConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let fetcher = FallbackFetcherBuilder::new()
            .with_credentials(config.sources)
            .with_http_client(Arc::clone(&http_client))
            .with_priority(config.priority)
            .with_timeout_ms(config.timeout_ms)
            .build();
        let notifier =
            TelegramNotifier::new(http_client, config.telegram).with_timeout_ms(config.timeout_ms);
        let history = HistoryStore::new(config.history_path).with_capacity(config.history_capacity);

        Self::new(fetcher, notifier, history)
    }

    pub fn fetcher(&self) -> &FallbackFetcher {
        &self.fetcher
    }

    /// Runs to completion. No failure inside aborts the run.
    pub async fn run_once(&mut self) -> RunReport {
        let fetched = match self.fetcher.fetch().await {
            Ok(success) => success,
            Err(failure) => {
                warn!("no gold price available this run");
                return RunReport {
                    quote: None,
                    selected_source: None,
                    attempts: failure.attempts,
                    fetch_latency_ms: failure.latency_ms,
                    notification: None,
                    history: None,
                };
            }
        };

        let notification = self.notifier.notify(&fetched.quote).await;

        self.history.load();
        self.history.record(fetched.quote.clone());
        let history = match self.history.save() {
            Ok(()) => {
                info!(
                    path = %self.history.path().display(),
                    entries = self.history.len(),
                    "history saved"
                );
                Ok(self.history.len())
            }
            Err(error) => {
                warn!(error = %error, "failed to save history");
                Err(error)
            }
        };

        RunReport {
            quote: Some(fetched.quote),
            selected_source: Some(fetched.selected_source),
            attempts: fetched.attempts,
            fetch_latency_ms: fetched.latency_ms,
            notification: Some(notification),
            history: Some(history),
        }
    }
}
