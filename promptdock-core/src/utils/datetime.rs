//! Datetime serialization/deserialization helpers.
//!
//! Provides custom Serde serialization/deserialization support:
//! - Serialization: `DateTime<Utc>` -> RFC3339 string with millisecond precision (`...T12:00:00.000Z`)
//! - Deserialization: RFC3339 string or Unix timestamp -> `DateTime<Utc>`

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Current time truncated to whole milliseconds.
///
/// Stored timestamps only carry milliseconds, so generated values are truncated
/// up front to survive a write/read cycle unchanged.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Formats a timestamp the way it is stored on disk.
#[must_use]
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

/// Deserializes `DateTime<Utc>` from RFC3339 or Unix timestamp.
///
/// Unix timestamps are auto-detected as seconds or milliseconds.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimestampOrString {
        String(String),
        I64(i64),
        U64(u64),
    }

    match TimestampOrString::deserialize(deserializer)? {
        TimestampOrString::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
        TimestampOrString::I64(ts) => {
            parse_unix_timestamp(ts).ok_or_else(|| Error::custom("Invalid Unix timestamp"))
        }
        TimestampOrString::U64(ts) => i64::try_from(ts)
            .ok()
            .and_then(parse_unix_timestamp)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
    }
}

/// Parses a Unix timestamp with second/millisecond auto-detection.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Values larger than 10^11 are interpreted as milliseconds.
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
