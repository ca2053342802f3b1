//! Field parsers shared by every trade log loader.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a trade timestamp into local wall-clock time.
///
/// Accepts RFC 3339 (the offset is dropped after reading the local time it
/// describes), naive date-times with or without seconds, and bare dates
/// (treated as midnight).
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a P&L amount. Non-finite values are rejected.
///
/// A `$` before or after the sign is tolerated. Commas are accepted only as
/// thousands separators (`1,250.50`); any other comma, such as a decimal
/// comma in `12,5`, makes the value invalid.
pub fn parse_result(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s.strip_prefix('$').unwrap_or(s);
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);
    if s.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = if s.contains(',') {
        strip_thousands(s)?
    } else {
        s.to_string()
    };
    let value = magnitude.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}

/// `1,234,567.89` to `1234567.89`; `None` unless every group after the first
/// has exactly three digits.
fn strip_thousands(s: &str) -> Option<String> {
    let (int_part, fraction) = match s.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (s, None),
    };
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());

    let mut groups = int_part.split(',');
    let first = groups.next()?;
    if !all_digits(first) || first.len() > 3 {
        return None;
    }
    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    if let Some(fraction) = fraction {
        if !all_digits(fraction) {
            return None;
        }
        digits.push('.');
        digits.push_str(fraction);
    }
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        assert_eq!(parse_date("2024-02-29"), Some(ymd_hms(2024, 2, 29, 0, 0, 0)));
    }

    #[test]
    fn parses_naive_datetimes() {
        assert_eq!(
            parse_date("2024-02-29 14:05:09"),
            Some(ymd_hms(2024, 2, 29, 14, 5, 9))
        );
        assert_eq!(
            parse_date("2024-02-29T14:05"),
            Some(ymd_hms(2024, 2, 29, 14, 5, 0))
        );
    }

    #[test]
    fn rfc3339_keeps_local_wall_clock() {
        // 23:30 in UTC+2 is still the 1st locally, even though it is 21:30 UTC.
        assert_eq!(
            parse_date("2024-03-01T23:30:00+02:00"),
            Some(ymd_hms(2024, 3, 1, 23, 30, 0))
        );
        assert_eq!(
            parse_date("2024-03-01T08:00:00Z"),
            Some(ymd_hms(2024, 3, 1, 8, 0, 0))
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn parses_results() {
        assert_eq!(parse_result("125.5"), Some(125.5));
        assert_eq!(parse_result(" -40 "), Some(-40.0));
        assert_eq!(parse_result("+7"), Some(7.0));
        assert_eq!(parse_result("$1,250.00"), Some(1250.0));
        assert_eq!(parse_result("-$1,250.5"), Some(-1250.5));
        assert_eq!(parse_result("1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_result("0"), Some(0.0));
    }

    #[test]
    fn misplaced_commas_are_invalid() {
        assert_eq!(parse_result("12,5"), None);
        assert_eq!(parse_result("-12,5"), None);
        assert_eq!(parse_result("1,2,3"), None);
        assert_eq!(parse_result("1234,567"), None);
        assert_eq!(parse_result(",500"), None);
        assert_eq!(parse_result("1,250."), None);
    }

    #[test]
    fn rejects_bad_results() {
        assert_eq!(parse_result(""), None);
        assert_eq!(parse_result("abc"), None);
        assert_eq!(parse_result("NaN"), None);
        assert_eq!(parse_result("inf"), None);
        assert_eq!(parse_result("+-7"), None);
    }
}
