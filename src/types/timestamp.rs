//! Wire representation of timestamps
//!
//! Timestamps travel as ISO-8601 / RFC 3339 strings in UTC with microsecond
//! precision, e.g. `2024-03-01T12:30:05.000042Z`. Use this module with
//! `#[serde(with = "crate::types::timestamp")]` on `DateTime<Utc>` fields.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Render a timestamp in the wire format
pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Truncate a timestamp to the precision carried on the wire
pub fn to_wire_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(6)
}

/// Serialize a timestamp in the wire format
pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(timestamp))
}

/// Deserialize a timestamp from its wire format
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_keeps_microseconds() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
            + Duration::microseconds(42);
        assert_eq!(format(&timestamp), "2024-03-01T12:30:05.000042Z");
    }

    #[test]
    fn test_to_wire_precision_drops_nanoseconds() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
            + Duration::nanoseconds(1_234_567);
        let truncated = to_wire_precision(timestamp);
        assert_eq!(format(&truncated), "2024-03-01T12:30:05.001234Z");
        assert_eq!(to_wire_precision(truncated), truncated);
    }
}
