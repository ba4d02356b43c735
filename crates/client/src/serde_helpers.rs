//! Serde helpers for loosely typed API payloads.
//!
//! Responsibilities:
//! - Accept identifiers that arrive as either JSON numbers or strings.
//! - Parse ISO-8601 timestamps with or without an explicit offset.
//!
//! Invariants / assumptions:
//! - Timestamps without an offset are interpreted as UTC.
//! - These helpers must not log or print secrets; errors are generic parse errors.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::I64(v) => v.to_string(),
            StringOrNumber::U64(v) => v.to_string(),
            StringOrNumber::F64(v) => v.to_string(),
        }
    }
}

/// Deserialize a string or number into a `String`.
pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_string())
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`, `2024-05-01T12:00:00+02:00`) and
/// offset-less forms (`2024-05-01T12:00:00`, `2024-05-01T12:00:00.1234567`).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Deserialize an ISO-8601 timestamp into `DateTime<Utc>`.
pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
}
