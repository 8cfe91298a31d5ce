//! Field-level (de)serializers for persisted records.
//!
//! Stored collections are read back whole, so a single odd field must not
//! make a row undecodable: every field decodes from any JSON value.
//! Timestamps are written the way browser clients write them
//! (`2025-03-01T10:00:00.123Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// JSON value as text: strings verbatim, `null` as empty, anything else in
/// its JSON form (`7`, `true`, `{"a":1}`).
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_text(&Value::deserialize(deserializer)?))
}

/// RFC 3339 string, or `None` for anything that does not parse.
pub fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|ts| ts.with_timezone(&Utc)))
}

pub fn serialize_timestamp<S: Serializer>(
    ts: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}
