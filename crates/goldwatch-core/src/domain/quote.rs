use serde::{Deserialize, Serialize};

use crate::{ProviderId, QuoteTimestamp, ValidationError};

/// Unstamped price reading produced by a quote source.
///
/// Readings are never persisted directly; the fetcher validates them and
/// stamps the capture time through [`CanonicalQuote::accept`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReading {
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub source: String,
}

impl PriceReading {
    pub fn new(
        provider: ProviderId,
        price: f64,
        currency: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            price,
            currency: currency.into(),
            unit: unit.into(),
            source: provider.label().to_owned(),
        }
    }
}

/// Canonical gold quote, independent of the originating provider's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalQuote {
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub source: String,
    pub timestamp: QuoteTimestamp,
}

impl CanonicalQuote {
    /// Validates a reading and stamps it with its capture time.
    pub fn accept(reading: PriceReading, timestamp: QuoteTimestamp) -> Result<Self, ValidationError> {
        validate_positive("price", reading.price)?;
        let currency = validate_currency_code(&reading.currency)?;
        if reading.source.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "source" });
        }

        Ok(Self {
            price: reading.price,
            currency,
            unit: reading.unit,
            source: reading.source,
            timestamp,
        })
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
