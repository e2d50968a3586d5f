//! # Domain Models
//!
//! Canonical domain types for goldwatch quotes.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PriceReading`] | Unstamped price as parsed from a provider payload |
//! | [`CanonicalQuote`] | Validated, time-stamped quote stored in the history log |
//! | [`QuoteTimestamp`] | Second-precision capture time (`YYYY-MM-DD HH:MM:SS`) |
//!
//! A reading only becomes a quote through [`CanonicalQuote::accept`], which
//! enforces `price > 0` and assigns the timestamp.

mod quote;
mod timestamp;

pub use quote::{validate_currency_code, CanonicalQuote, PriceReading};
pub use timestamp::QuoteTimestamp;
