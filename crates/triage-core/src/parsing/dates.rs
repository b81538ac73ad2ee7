use crate::error::MessageError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-and-time layouts; the time part is dropped after parsing.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

/// Parse a raw due date into a calendar day.
///
/// Handles formats like:
/// - "2020-03-02" -> 2020-03-02
/// - "2020-03-02 00:00:00" -> 2020-03-02 (time discarded)
/// - "2020-03-02T14:30:00.123" -> 2020-03-02
/// - "2020-03-02T14:30:00+01:00" -> 2020-03-02
/// - "02.03.2020" -> 2020-03-02
/// - "" or missing -> None
pub fn normalize_date(raw: Option<&str>) -> Result<Option<NaiveDate>, MessageError> {
    let s = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Some(dt.date()));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(Some(date));
        }
    }

    // Keep the local calendar day the sender wrote, not the UTC one.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(dt.date_naive()));
    }

    Err(MessageError::InvalidDate(s.to_string()))
}

/// ISO 8601 week number (1-53).
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(normalize_date(None).unwrap(), None);
        assert_eq!(normalize_date(Some("")).unwrap(), None);
        assert_eq!(normalize_date(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(normalize_date(Some("2020-03-02")).unwrap(), Some(ymd(2020, 3, 2)));
    }

    #[test]
    fn test_time_component_discarded() {
        assert_eq!(
            normalize_date(Some("2020-03-02 00:00:00")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
        assert_eq!(
            normalize_date(Some("2020-03-02 23:59")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
        assert_eq!(
            normalize_date(Some("2020-03-02T14:30:00")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(
            normalize_date(Some("2020-03-02T14:30:00.123")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
        assert_eq!(
            normalize_date(Some("2020-03-02 14:30:00.000000")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
        assert_eq!(
            normalize_date(Some("02.03.2020 14:30:00.5")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
    }

    #[test]
    fn test_rfc3339_keeps_written_day() {
        assert_eq!(
            normalize_date(Some("2020-03-02T23:30:00-05:00")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
    }

    #[test]
    fn test_european_dotted() {
        assert_eq!(normalize_date(Some("02.03.2020")).unwrap(), Some(ymd(2020, 3, 2)));
        assert_eq!(
            normalize_date(Some("02.03.2020 08:15")).unwrap(),
            Some(ymd(2020, 3, 2))
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            normalize_date(Some("next tuesday")),
            Err(MessageError::InvalidDate("next tuesday".into()))
        );
        assert!(normalize_date(Some("2020-13-45")).is_err());
    }

    #[test]
    fn test_iso_week() {
        assert_eq!(iso_week(ymd(2020, 3, 2)), 10);
        assert_eq!(iso_week(ymd(2021, 1, 1)), 53);
        assert_eq!(iso_week(ymd(2024, 12, 30)), 1);
    }
}
