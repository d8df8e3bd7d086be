use crate::ids::TransactionId;
use crate::Money;

use std::fmt;

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

/// A single recorded income or expense event
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: Money,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    #[serde(with = "iso_date")]
    pub date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn parse(string: &str) -> Option<Self> {
        match string.trim().to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ISO 8601 with millisecond precision and a `Z` suffix, e.g. `2024-03-01T09:30:00.000Z`
mod iso_date {
    use chrono::{DateTime, SecondsFormat, Utc};

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let string = String::deserialize(deserializer)?;

        DateTime::parse_from_rfc3339(&string)
            .map(|date| date.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
