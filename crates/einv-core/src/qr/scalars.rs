//! Scalar decoders: lenient integers, percent-decoding, dual-calendar dates.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};

use super::patterns::{GREGORIAN_DATE, ROC_DATE};

/// Parse the leading run of digits in `value`, falling back to `default` when
/// there is none. Scanner noise in a numeric field is not worth rejecting an
/// invoice over, so this never fails.
pub fn to_int(value: &str, default: u64) -> u64 {
    let digits: &str = {
        let trimmed = value.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };

    if digits.is_empty() {
        return default;
    }
    digits.parse().unwrap_or(default)
}

/// Percent-decode a payload, returning the input unchanged when the decoded
/// bytes are not valid UTF-8. Stray `%` sequences without valid hex digits
/// pass through verbatim.
pub fn safe_decode(s: &str) -> Cow<'_, str> {
    match urlencoding::decode(s) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(s),
    }
}

/// Normalize an invoice date to `YYYY-MM-DD`.
///
/// Taiwan headers use either calendar era: after stripping `/`, `-` and `.`,
/// a 7-digit string is a Minguo (ROC) date whose 3-digit year is offset by
/// +1911, and an 8-digit string is Gregorian `YYYYMMDD`. Anything else gets a
/// last-chance generic parse; when even that fails the original string is
/// returned verbatim for the caller to deal with.
pub fn parse_date(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let clean: String = s.chars().filter(|c| !matches!(c, '/' | '-' | '.')).collect();

    if ROC_DATE.is_match(&clean) {
        let year = clean[..3].parse::<i32>().unwrap_or(0) + 1911;
        let month: u32 = clean[3..5].parse().unwrap_or(0);
        let day: u32 = clean[5..7].parse().unwrap_or(0);
        if NaiveDate::from_ymd_opt(year, month, day).is_some() {
            return format!("{year:04}-{month:02}-{day:02}");
        }
        return s.to_string();
    }

    if GREGORIAN_DATE.is_match(&clean) {
        let year: i32 = clean[..4].parse().unwrap_or(0);
        let month: u32 = clean[4..6].parse().unwrap_or(0);
        let day: u32 = clean[6..8].parse().unwrap_or(0);
        if NaiveDate::from_ymd_opt(year, month, day).is_some() {
            return format!("{year:04}-{month:02}-{day:02}");
        }
        return s.to_string();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }

    // Receipt-style CJK date, e.g. 2023年11月15日
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y年%m月%d日") {
        return date.format("%Y-%m-%d").to_string();
    }

    s.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_to_int_defaults() {
        assert_eq!(to_int("abc", 5), 5);
        assert_eq!(to_int("", 1), 1);
        assert_eq!(to_int("-5", 0), 0);
    }

    #[test]
    fn test_to_int_leading_digits() {
        assert_eq!(to_int("42x", 0), 42);
        assert_eq!(to_int("  800  ", 0), 800);
        assert_eq!(to_int("7.5", 0), 7);
    }

    #[test]
    fn test_safe_decode_roundtrip() {
        assert_eq!(
            safe_decode("GH55667788%3A1121010"),
            "GH55667788:1121010"
        );
        assert_eq!(safe_decode("%E5%95%86%E5%93%81"), "商品");
    }

    #[test]
    fn test_safe_decode_malformed_returns_input() {
        // Stray percent with no hex digits
        assert_eq!(safe_decode("50%ZZoff"), "50%ZZoff");
        // Decodes to invalid UTF-8
        assert_eq!(safe_decode("%E4"), "%E4");
    }

    #[test]
    fn test_parse_date_roc() {
        assert_eq!(parse_date("1120515"), "2023-05-15");
        assert_eq!(parse_date("112/05/15"), "2023-05-15");
        assert_eq!(parse_date("112.05.15"), "2023-05-15");
    }

    #[test]
    fn test_parse_date_gregorian() {
        assert_eq!(parse_date("20231115"), "2023-11-15");
        assert_eq!(parse_date("2023-11-15"), "2023-11-15");
    }

    #[test]
    fn test_parse_date_generic_formats() {
        assert_eq!(parse_date("2023-11-15T10:30:00+08:00"), "2023-11-15");
        assert_eq!(parse_date("2023年11月15日"), "2023-11-15");
    }

    #[test]
    fn test_parse_date_unrecognized_passthrough() {
        assert_eq!(parse_date("next week"), "next week");
        assert_eq!(parse_date(""), "");
        // Impossible calendar dates come back verbatim rather than as
        // well-shaped nonsense.
        assert_eq!(parse_date("1121399"), "1121399");
        assert_eq!(parse_date("20230230"), "20230230");
    }
}
