//! Reference timestamp parsing and output formatting

use chrono::{DateTime, FixedOffset, Timelike, Weekday};

use crate::error::TimestampError;

/// A point in time carrying the fixed offset it was given in.
pub type Instant = DateTime<FixedOffset>;

/// `yyyy-MM-dd'T'HH:mm:ssZ`, e.g. `2019-10-11T16:00:00+0800`
pub const REFERENCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub fn parse_reference(input: &str) -> Result<Instant, TimestampError> {
    let invalid = |reason: String| TimestampError::Invalid {
        input: input.to_string(),
        reason,
    };

    // %z also takes `+08:00`; only the `+0800` form is accepted
    if !has_numeric_offset(input) {
        return Err(invalid("offset must be +hhmm or -hhmm".to_string()));
    }

    let instant =
        DateTime::parse_from_str(input, REFERENCE_FORMAT).map_err(|e| invalid(e.to_string()))?;

    // %S also takes a leap second `60`
    if instant.nanosecond() >= 1_000_000_000 {
        return Err(invalid("seconds must be 00-59".to_string()));
    }

    Ok(instant)
}

fn has_numeric_offset(input: &str) -> bool {
    let bytes = input.as_bytes();
    match bytes.len().checked_sub(5).map(|start| &bytes[start..]) {
        Some([sign, digits @ ..]) => {
            matches!(sign, b'+' | b'-') && digits.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// ISO-8601 extended form with the seconds dropped when they are zero and a
/// zero offset written as `Z`: `2019-10-14T10:00+08:00`, `2019-10-14T10:00:30Z`.
pub fn format_instant(instant: &Instant) -> String {
    let pattern = if instant.second() == 0 && instant.nanosecond() == 0 {
        "%Y-%m-%dT%H:%M"
    } else {
        "%Y-%m-%dT%H:%M:%S"
    };

    let offset = if instant.offset().local_minus_utc() == 0 {
        "Z".to_string()
    } else {
        instant.format("%:z").to_string()
    };

    format!("{}{}", instant.format(pattern), offset)
}

/// Upper-case English weekday name, e.g. `FRIDAY`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_keeps_offset() {
        let instant = parse_reference("2019-10-11T16:00:00+0800").expect("valid timestamp");
        assert_eq!(instant.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(instant.hour(), 16);
        assert_eq!(instant.weekday(), Weekday::Fri);
    }

    #[test]
    fn test_parse_negative_offset() {
        let instant = parse_reference("2019-10-11T23:30:00-0530").unwrap();
        assert_eq!(instant.offset().local_minus_utc(), -(5 * 3600 + 30 * 60));
        // Weekday comes from the local date, not UTC
        assert_eq!(instant.weekday(), Weekday::Fri);
    }

    #[test]
    fn test_parse_rejects_other_patterns() {
        for input in [
            "",
            "2019-10-11",
            "2019-10-11T16:00:00",
            "2019-10-11 16:00:00+0800",
            "2019-13-11T16:00:00+0800",
            "2019-02-30T16:00:00+0800",
            "2019-10-11T16:00+0800",
            "2019-10-07T12:59:60+0800",
            "2019-10-07T16:59:60+0800",
            "2019-10-07T12:00:00+08:00",
            "2019-10-07T12:00:00Z",
            "2019-10-07T12:00:00+08",
            "tomorrow",
        ] {
            let result = parse_reference(input);
            assert!(result.is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_parse_leap_second_rejected() {
        let err = parse_reference("2019-10-07T12:59:60+0800").unwrap_err();
        assert!(err.to_string().contains("00-59"), "error: {}", err);
    }

    #[test]
    fn test_parse_colon_offset_rejected() {
        let err = parse_reference("2019-10-07T12:00:00+08:00").unwrap_err();
        assert!(err.to_string().contains("+hhmm"), "error: {}", err);
    }

    #[test]
    fn test_parse_error_mentions_input() {
        let err = parse_reference("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"), "error: {}", err);
    }

    #[test]
    fn test_format_drops_zero_seconds() {
        let instant = parse_reference("2019-10-14T10:00:00+0800").unwrap();
        assert_eq!(format_instant(&instant), "2019-10-14T10:00+08:00");
    }

    #[test]
    fn test_format_keeps_nonzero_seconds() {
        let instant = parse_reference("2019-10-14T10:00:30-0330").unwrap();
        assert_eq!(format_instant(&instant), "2019-10-14T10:00:30-03:30");
    }

    #[test]
    fn test_format_utc_as_z() {
        let instant = parse_reference("2019-10-14T10:15:00+0000").unwrap();
        assert_eq!(format_instant(&instant), "2019-10-14T10:15Z");
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "MONDAY");
        assert_eq!(weekday_name(Weekday::Sun), "SUNDAY");
    }
}
