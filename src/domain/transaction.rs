use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{chips::Chips, wire};

/// One immutable ledger entry. History is stored newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// `None` only for stored rows whose timestamp does not parse.
    #[serde(
        default,
        deserialize_with = "wire::deserialize_timestamp",
        serialize_with = "wire::serialize_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    /// Account the entry belongs to.
    #[serde(deserialize_with = "wire::deserialize_text")]
    pub id: String,
    /// Free text from the client; non-string values are kept in JSON form.
    #[serde(default, deserialize_with = "wire::deserialize_text")]
    pub games: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    /// Always the positive magnitude; the direction lives in `tx_type`.
    pub amount: Chips,
    /// Account balance right after this entry was applied.
    pub balance: Chips,
    #[serde(default, deserialize_with = "wire::deserialize_text")]
    pub dealer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Add,
    Subtract,
    /// Opening entry written when an account is created.
    Generate,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Add => "add",
            TxType::Subtract => "subtract",
            TxType::Generate => "generate",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransactionRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        id: impl Into<String>,
        tx_type: TxType,
        amount: Chips,
        balance: Chips,
    ) -> Self {
        Self {
            timestamp: Some(timestamp),
            id: id.into(),
            games: String::new(),
            tx_type,
            amount,
            balance,
            dealer: String::new(),
        }
    }

    pub fn with_context(mut self, games: impl Into<String>, dealer: impl Into<String>) -> Self {
        self.games = games.into();
        self.dealer = dealer.into();
        self
    }
}
