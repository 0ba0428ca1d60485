//! Date-time parsing and time zone display conversion.
//!
//! This module contains the parsing used by the schema's date-time rule
//! and the derived view helper that converts a date-time value into a
//! zone-local display string.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::*;

/// Accepted input shapes, matching what a `datetime-local` input yields.
///
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Display format approximating an en-US locale string.
///
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Parse a date-time entry. Returns None for anything that does not match
/// one of the accepted shapes.
///
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Convert a date-time string plus an IANA zone identifier into a
/// locale-formatted display string using the zone's civil time.
///
/// Empty input yields an empty string. Unparseable input or an unknown
/// zone also yield an empty string rather than a formatting artifact.
///
pub fn convert_date_time(date_time: &str, zone: &str) -> String {
    if date_time.is_empty() {
        return String::new();
    }
    let naive = match parse_date_time(date_time) {
        Some(naive) => naive,
        None => return String::new(),
    };
    let tz: Tz = match zone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            warn!("Unknown time zone identifier '{}'", zone);
            return String::new();
        }
    };
    Utc.from_utc_datetime(&naive)
        .with_timezone(&tz)
        .format(DISPLAY_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time_with_and_without_seconds() {
        assert!(parse_date_time("2024-06-01T10:30").is_some());
        assert!(parse_date_time("2024-06-01T10:30:15").is_some());
    }

    #[test]
    fn test_parse_date_time_rejects_garbage() {
        assert!(parse_date_time("").is_none());
        assert!(parse_date_time("not a date").is_none());
        assert!(parse_date_time("2024-13-01T10:30").is_none());
        assert!(parse_date_time("2024-06-01").is_none());
    }

    #[test]
    fn test_convert_empty_returns_empty() {
        assert_eq!(convert_date_time("", "Asia/Kolkata"), "");
    }

    #[test]
    fn test_convert_unparseable_returns_empty() {
        assert_eq!(convert_date_time("garbage", "Asia/Kolkata"), "");
    }

    #[test]
    fn test_convert_unknown_zone_returns_empty() {
        assert_eq!(convert_date_time("2024-06-01T10:30", "Mars/Olympus"), "");
    }

    #[test]
    fn test_convert_applies_zone_offset() {
        // Kolkata is UTC+5:30 year-round
        let display = convert_date_time("2024-06-01T10:30", "Asia/Kolkata");
        assert_eq!(display, "6/1/2024, 4:00:00 PM");
    }

    #[test]
    fn test_convert_produces_no_parse_artifacts() {
        let display = convert_date_time("2024-06-01T10:30", "America/New_York");
        assert!(!display.is_empty());
        assert!(!display.contains("Invalid"));
    }
}
