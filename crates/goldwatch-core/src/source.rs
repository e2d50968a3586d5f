use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical identifiers of the gold price feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    GoldApi,
    Jijinhao,
    Qingyunke,
}

impl ProviderId {
    /// Default fallback order.
    pub const ALL: [Self; 3] = [Self::GoldApi, Self::Jijinhao, Self::Qingyunke];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoldApi => "goldapi",
            Self::Jijinhao => "jijinhao",
            Self::Qingyunke => "qingyunke",
        }
    }

    /// Human-facing label stored as the `source` of a quote.
    pub const fn label(self) -> &'static str {
        match self {
            Self::GoldApi => "GoldAPI",
            Self::Jijinhao => "金投网",
            Self::Qingyunke => "简易API",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "goldapi" => Ok(Self::GoldApi),
            "jijinhao" => Ok(Self::Jijinhao),
            "qingyunke" => Ok(Self::Qingyunke),
            other => Err(ValidationError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}
