//! # goldwatch core
//!
//! Fetches a gold price from several third-party feeds with a single
//! priority-ordered fallback pass, notifies a Telegram chat, and keeps a
//! bounded JSON history of past quotes.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Feed adapters (GoldAPI, Jijinhao, Qingyunke) |
//! | [`config`] | Explicit credentials and run configuration |
//! | [`domain`] | Price readings, canonical quotes, timestamps |
//! | [`error`] | Validation, history and notification errors |
//! | [`history`] | Bounded append-only history file |
//! | [`http_client`] | HTTP transport seam (reqwest or canned) |
//! | [`monitor`] | One fetch/notify/record run |
//! | [`notifier`] | Telegram notification |
//! | [`quote_source`] | Source trait and attempt outcomes |
//! | [`routing`] | Fallback fetcher |
//! | [`source`] | Provider identifiers |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / cron     │
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  GoldMonitor    │────▶│ TelegramNotifier │
//! └────────┬────────┘     └──────────────────┘
//!          │        \     ┌──────────────────┐
//!          │         ────▶│ HistoryStore     │
//!          ▼              └──────────────────┘
//! ┌─────────────────┐     ┌──────────────────┐
//! │ FallbackFetcher │────▶│ QuoteSource × N  │──▶ HttpClient
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use goldwatch_core::{GoldMonitor, MonitorConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut monitor = GoldMonitor::from_config(MonitorConfig::default());
//!     let report = monitor.run_once().await;
//!     if let Some(quote) = report.quote {
//!         println!("{} {}", quote.price, quote.currency);
//!     }
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod http_client;
pub mod monitor;
pub mod notifier;
pub mod quote_source;
pub mod routing;
pub mod source;

pub use adapters::{GoldApiAdapter, JijinhaoAdapter, QingyunkeAdapter};
pub use config::{MonitorConfig, SourceCredentials, TelegramCredentials, DEFAULT_HISTORY_FILE};
pub use domain::{validate_currency_code, CanonicalQuote, PriceReading, QuoteTimestamp};
pub use error::{HistoryError, NotifyError, ValidationError};
pub use history::{HistoryStore, DEFAULT_HISTORY_CAPACITY};
pub use http_client::{
    CannedHttpClient, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient, DEFAULT_TIMEOUT_MS,
};
pub use monitor::{GoldMonitor, RunReport};
pub use notifier::{render_message, NotifyOutcome, TelegramNotifier, TELEGRAM_API_BASE};
pub use quote_source::{QuoteSource, SourceError, SourceErrorKind, SourceOutcome};
pub use routing::{
    AttemptOutcome, FallbackFetcher, FallbackFetcherBuilder, FetchFailure, FetchResult,
    FetchSuccess, SourceAttempt,
};
pub use source::ProviderId;
