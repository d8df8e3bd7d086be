use crate::Transaction;

use chrono::SecondsFormat;

use serde::{Deserialize, Serialize};

/// One exported csv row
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransactionReport {
    pub id: String,
    pub date: String,

    #[serde(rename = "type")]
    pub typ: String,

    pub description: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionReport {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.to_string(),
            date: tx.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            typ: tx.tx_type.to_string(),
            description: tx.description.clone(),
            amount: tx.amount.to_string(),
        }
    }
}
