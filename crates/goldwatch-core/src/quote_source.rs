//! Quote source trait and attempt outcome types.
//!
//! Every gold price feed implements [`QuoteSource`]. A single
//! [`attempt`](QuoteSource::attempt) makes at most one network call and
//! reports one of three outcomes:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | [`SourceOutcome::Quoted`] | payload parsed into a [`PriceReading`] |
//! | [`SourceOutcome::Skipped`] | precondition unmet (missing credential), no request sent |
//! | [`SourceOutcome::Failed`] | transport, status or parse failure |
//!
//! Sources never stamp timestamps and never validate the price sign; both
//! belong to the fetcher.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{PriceReading, ProviderId};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    InvalidResponse,
    InvalidPrice,
}

/// Structured source failure used by the fallback fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidResponse,
            message: message.into(),
        }
    }

    pub fn invalid_price(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidPrice,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::InvalidPrice => "source.invalid_price",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Result of one source attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Quoted(PriceReading),
    Skipped(String),
    Failed(SourceError),
}

impl From<Result<PriceReading, SourceError>> for SourceOutcome {
    fn from(result: Result<PriceReading, SourceError>) -> Self {
        match result {
            Ok(reading) => Self::Quoted(reading),
            Err(error) => Self::Failed(error),
        }
    }
}

pub type AttemptFuture<'a> = Pin<Box<dyn Future<Output = SourceOutcome> + Send + 'a>>;

/// Gold price feed contract.
///
/// Implementations must be `Send + Sync`; the fetcher holds them behind `Arc`.
pub trait QuoteSource: Send + Sync {
    /// Returns the provider identifier.
    fn id(&self) -> ProviderId;

    /// Whether this source needs an API token to run.
    fn requires_credential(&self) -> bool {
        false
    }

    /// Whether the source is able to send a request at all.
    ///
    /// Used for the `sources` listing; `attempt` performs the same check.
    fn is_ready(&self) -> bool {
        true
    }

    /// Performs one network attempt.
    fn attempt(&self) -> AttemptFuture<'_>;
}
