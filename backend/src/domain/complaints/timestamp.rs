//! Serde helpers for complaint timestamps.
//!
//! Timestamps are written as RFC 3339 UTC with millisecond precision. Reads
//! also accept the zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` form used by the
//! seed registry, interpreted as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Error returned when a timestamp string matches neither accepted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp '{value}'")]
pub struct TimestampParseError {
    value: String,
}

/// Parse a persisted timestamp.
///
/// # Examples
/// ```
/// use cms_backend::domain::complaints::parse_timestamp;
///
/// let naive = parse_timestamp("2025-01-15T09:30:00").expect("seed format");
/// let zoned = parse_timestamp("2025-01-15T09:30:00.000Z").expect("rfc 3339");
/// assert_eq!(naive, zoned);
/// ```
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampParseError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| TimestampParseError {
            value: value.to_owned(),
        })
}

/// Render a timestamp in the persisted form.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
