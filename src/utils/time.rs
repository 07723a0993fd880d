use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Current wall-clock time in the given timezone, without offset info
pub fn localized_now(tz: &Tz) -> NaiveDateTime {
    Utc::now().with_timezone(tz).naive_local()
}

/// Parse an evaluation instant from a query or CLI argument
///
/// Accepts RFC 3339 timestamps, which are converted into the given timezone,
/// and naive `YYYY-MM-DDTHH:MM[:SS]` forms, which are taken as already local.
pub fn parse_instant(value: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(tz).naive_local());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    #[test]
    fn test_parse_naive_timestamps() {
        // With and without seconds
        let parsed = parse_instant("2023-01-04T14:30:00", &New_York).unwrap();
        assert_eq!(
            parsed.format("%Y-%m-%d %H:%M").to_string(),
            "2023-01-04 14:30"
        );

        let parsed = parse_instant("2023-01-04T14:30", &New_York).unwrap();
        assert_eq!(
            parsed.format("%Y-%m-%d %H:%M").to_string(),
            "2023-01-04 14:30"
        );
    }

    #[test]
    fn test_rfc3339_converts_into_timezone() {
        // 19:30 UTC is 14:30 in New York in January
        let parsed = parse_instant("2023-01-04T19:30:00Z", &New_York).unwrap();
        assert_eq!(
            parsed.format("%Y-%m-%d %H:%M").to_string(),
            "2023-01-04 14:30"
        );

        // Same instant written with an explicit offset
        let parsed = parse_instant("2023-01-04T14:30:00-05:00", &New_York).unwrap();
        assert_eq!(
            parsed.format("%Y-%m-%d %H:%M").to_string(),
            "2023-01-04 14:30"
        );
    }

    #[test]
    fn test_invalid_instants_are_rejected() {
        assert_eq!(parse_instant("today", &New_York), None);
        assert_eq!(parse_instant("2023-01-04", &New_York), None);
        assert_eq!(parse_instant("", &New_York), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let parsed = parse_instant("  2023-01-04T14:30:00  ", &New_York).unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "14:30");
    }
}
