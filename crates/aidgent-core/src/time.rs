//! Timestamp helpers.
//!
//! All timestamps in the client are carried as RFC 3339 text with
//! millisecond precision, which also sorts correctly as plain strings.

use chrono::{SecondsFormat, TimeZone, Utc};

/// Returns the current client time as RFC 3339 text.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Converts an epoch-milliseconds timestamp to RFC 3339 text.
///
/// Out-of-range values fall back to the current client time.
pub fn millis_to_rfc3339(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => now_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_conversion() {
        assert_eq!(millis_to_rfc3339(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(millis_to_rfc3339(1_700_000_000_000), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_now_is_rfc3339() {
        let now = now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
        assert!(now.ends_with('Z'));
    }
}
