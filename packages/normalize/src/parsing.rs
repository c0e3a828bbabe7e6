//! Shared parsing utilities for source table fields.
//!
//! Source extracts disagree on date formats and carry numeric columns as
//! text, sometimes with decimal points. Everything here is best-effort:
//! `None` means the caller decides whether the absence is recoverable.

use chrono::NaiveDate;

/// Calendar years accepted as plausible for events, births, and surveys.
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1800..=2100;

/// Parses an event date, trying the formats seen across source extracts
/// in order: ISO (`2014-03-01`), long form (`01 March 2014`), and US
/// slash form (`03/01/2014`).
#[must_use]
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    for format in ["%Y-%m-%d", "%d %B %Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

/// Parses a plausible calendar year. Returns `None` if missing,
/// unparseable, or outside 1800-2100.
#[must_use]
pub fn parse_year(raw: Option<&str>) -> Option<i32> {
    let year = raw?.trim().parse::<i32>().ok()?;
    PLAUSIBLE_YEARS.contains(&year).then_some(year)
}

/// Coerces a fatality count to a non-negative integer.
///
/// Missing, blank, and unparseable values coerce to zero. Negative values
/// also coerce to zero, but are flagged so the caller can count them.
/// Decimal text like `"3.0"` is accepted because some extracts round-trip
/// counts through floats.
#[must_use]
pub fn parse_fatalities(raw: Option<&str>) -> (u32, bool) {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return (0, false);
    };
    let Some(value) = parse_integerish(text) else {
        return (0, false);
    };
    if value < 0 {
        (0, true)
    } else {
        (u32::try_from(value).unwrap_or(u32::MAX), false)
    }
}

/// Parses a years-of-schooling value, clamping to `0..=max`.
///
/// Returns `None` when the value is missing or unparseable, otherwise the
/// clamped value and whether clamping changed it.
#[must_use]
pub fn parse_schooling(raw: Option<&str>, max: u8) -> Option<(u8, bool)> {
    let text = raw.map(str::trim).filter(|t| !t.is_empty())?;
    let value = parse_integerish(text)?;
    if value < 0 {
        Some((0, true))
    } else if value > i64::from(max) {
        Some((max, true))
    } else {
        u8::try_from(value).ok().map(|v| (v, false))
    }
}

/// Parses integer text, tolerating a float representation of a whole-ish
/// number by truncating it.
fn parse_integerish(text: &str) -> Option<i64> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    let f = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    #[allow(clippy::cast_possible_truncation)]
    Some(f.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let date = parse_event_date("2014-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2014, 3, 1).unwrap());
    }

    #[test]
    fn parses_long_form_date() {
        let date = parse_event_date("01 March 2014").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2014, 3, 1).unwrap());
    }

    #[test]
    fn parses_slash_date() {
        let date = parse_event_date(" 03/01/2014 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2014, 3, 1).unwrap());
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_event_date("not-a-date").is_none());
        assert!(parse_event_date("2014-13-40").is_none());
        assert!(parse_event_date("").is_none());
    }

    #[test]
    fn parses_plausible_years_only() {
        assert_eq!(parse_year(Some("1987")), Some(1987));
        assert_eq!(parse_year(Some(" 2018 ")), Some(2018));
        assert_eq!(parse_year(Some("87")), None);
        assert_eq!(parse_year(Some("nineteen")), None);
        assert_eq!(parse_year(None), None);
    }

    #[test]
    fn coerces_fatalities() {
        assert_eq!(parse_fatalities(Some("3")), (3, false));
        assert_eq!(parse_fatalities(Some("3.0")), (3, false));
        assert_eq!(parse_fatalities(Some("")), (0, false));
        assert_eq!(parse_fatalities(Some("n/a")), (0, false));
        assert_eq!(parse_fatalities(None), (0, false));
    }

    #[test]
    fn flags_negative_fatalities() {
        assert_eq!(parse_fatalities(Some("-2")), (0, true));
        assert_eq!(parse_fatalities(Some("-0.5")), (0, false), "truncates to zero");
    }

    #[test]
    fn clamps_schooling_at_both_ends() {
        assert_eq!(parse_schooling(Some("9"), 20), Some((9, false)));
        assert_eq!(parse_schooling(Some("25"), 20), Some((20, true)));
        assert_eq!(parse_schooling(Some("-1"), 20), Some((0, true)));
        assert_eq!(parse_schooling(Some("6.0"), 20), Some((6, false)));
        assert_eq!(parse_schooling(Some("unknown"), 20), None);
        assert_eq!(parse_schooling(None, 20), None);
    }
}
