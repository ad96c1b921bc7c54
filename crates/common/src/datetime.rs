//! Current-time helpers with fixed-offset timezones.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use std::fmt::{Display, Write};

use utilkit_domain::UtilError;

/// W3C / RFC 3339 layout, e.g. `2024-01-15T10:30:00+00:00`
pub const W3C_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Parses a timezone given as `UTC`, `GMT`, `Z` or a fixed offset.
///
/// Offsets may be written `+05:30`, `-0330` or `+05`, optionally prefixed
/// with `UTC` or `GMT`.
///
/// # Examples
///
/// ```
/// use utilkit_common::datetime::parse_timezone;
///
/// assert_eq!(parse_timezone("UTC").unwrap().local_minus_utc(), 0);
/// assert_eq!(parse_timezone("+05:30").unwrap().local_minus_utc(), 19_800);
/// assert!(parse_timezone("Mars/Olympus").is_err());
/// ```
///
/// # Errors
///
/// Returns `UtilError::InvalidInput` for anything else.
pub fn parse_timezone(tz: &str) -> Result<FixedOffset, UtilError> {
    let upper = tz.trim().to_ascii_uppercase();

    let offset = match upper.as_str() {
        "UTC" | "GMT" | "Z" => return Ok(Utc.fix()),
        other => other
            .strip_prefix("UTC")
            .or_else(|| other.strip_prefix("GMT"))
            .unwrap_or(other),
    };

    parse_offset(offset).ok_or_else(|| UtilError::invalid_input(format!("Unknown timezone: {}", tz)))
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return None;
    }

    let (hours, minutes): (i32, i32) = match rest.split_once(':') {
        Some((h, m)) => (h.parse().ok()?, m.parse().ok()?),
        None if rest.len() <= 2 => (rest.parse().ok()?, 0),
        None if rest.len() == 4 => (rest[..2].parse().ok()?, rest[2..].parse().ok()?),
        None => return None,
    };

    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Current time in the given timezone
///
/// # Errors
///
/// Returns `UtilError::InvalidInput` if the timezone cannot be parsed.
pub fn current_time(tz: &str) -> Result<DateTime<FixedOffset>, UtilError> {
    let offset = parse_timezone(tz)?;
    Ok(Utc::now().with_timezone(&offset))
}

/// Current UTC time
pub fn current_time_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Formats `dt` with a strftime-style `format`.
///
/// # Errors
///
/// Returns `UtilError::InvalidInput` if `format` contains an unknown specifier.
pub fn format_datetime<Tz>(dt: &DateTime<Tz>, format: &str) -> Result<String, UtilError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let invalid = || UtilError::invalid_input(format!("Invalid date format: {}", format));

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(StrftimeItems::new(format))).map_err(|_| invalid())?;
    Ok(out)
}

/// Current UTC time formatted with `format`
///
/// # Errors
///
/// Returns `UtilError::InvalidInput` if `format` contains an unknown specifier.
pub fn current_time_string(format: &str) -> Result<String, UtilError> {
    format_datetime(&current_time_utc(), format)
}

/// Current UTC time in [`W3C_FORMAT`]
pub fn current_time_w3c() -> String {
    current_time_utc().format(W3C_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timezone_names() {
        for name in ["UTC", "utc", "GMT", "Z", " UTC "] {
            assert_eq!(parse_timezone(name).unwrap().local_minus_utc(), 0, "{}", name);
        }
    }

    #[test]
    fn test_parse_timezone_offsets() {
        assert_eq!(parse_timezone("+05:30").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_timezone("-0330").unwrap().local_minus_utc(), -12_600);
        assert_eq!(parse_timezone("+02").unwrap().local_minus_utc(), 7_200);
        assert_eq!(parse_timezone("UTC-08:00").unwrap().local_minus_utc(), -28_800);
    }

    #[test]
    fn test_parse_timezone_invalid() {
        for bad in ["", "Europe/Paris", "+", "+5:75", "+123", "+99:00", "05:00"] {
            let err = parse_timezone(bad).unwrap_err();
            assert!(err.is_invalid_input(), "{}", bad);
        }
    }

    #[test]
    fn test_current_time_uses_offset() {
        let now = current_time("+02:00").unwrap();
        assert_eq!(now.offset().local_minus_utc(), 7_200);
        assert!(current_time("nowhere").is_err());
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_datetime(&dt, W3C_FORMAT).unwrap(), "2024-01-15T10:30:00+00:00");
        assert_eq!(format_datetime(&dt, "%d/%m/%Y").unwrap(), "15/01/2024");
    }

    #[test]
    fn test_format_datetime_rejects_unknown_specifier() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert!(format_datetime(&dt, "%Q").is_err());
    }

    #[test]
    fn test_current_time_w3c_parses_back() {
        let rendered = current_time_w3c();
        let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
        assert!(parsed.year() >= 2024);
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(parsed.hour() < 24);
    }

    #[test]
    fn test_current_time_string() {
        let year = current_time_string("%Y").unwrap();
        assert_eq!(year.len(), 4);
        assert!(current_time_string("%Q").is_err());
    }
}
