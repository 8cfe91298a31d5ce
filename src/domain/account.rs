use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{chips::Chips, wire};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "wire::deserialize_text")]
    pub id: String,
    /// Current chip count. May be negative after a subtract.
    #[serde(default)]
    pub balance: Chips,
    /// Absent on records written before creation time was tracked, or
    /// when the stored value is not an RFC 3339 timestamp.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::deserialize_timestamp",
        serialize_with = "wire::serialize_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(id: impl Into<String>, balance: Chips, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            balance,
            created_at: Some(created_at),
        }
    }
}
