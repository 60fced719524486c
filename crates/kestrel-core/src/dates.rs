use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Output format for all normalized dates.
const OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Accepted input formats, tried in order. ISO first (native date cells are
/// rendered ISO by the sheet loader), then the portal's US month-first
/// textual forms.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y", "%d-%b-%Y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Normalize a date cell to `DD/MM/YYYY`.
///
/// Every parseable input maps to exactly one output string; anything
/// unparseable is an error, never passed through.
pub fn normalize_date(value: &str) -> Result<String> {
    let trimmed = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format(OUTPUT_FORMAT).to_string());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date().format(OUTPUT_FORMAT).to_string());
        }
    }

    Err(Error::DateParse(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date() {
        assert_eq!(normalize_date("2024-03-15").unwrap(), "15/03/2024");
    }

    #[test]
    fn test_us_slash_date() {
        assert_eq!(normalize_date("03/15/2024").unwrap(), "15/03/2024");
    }

    #[test]
    fn test_month_name_date() {
        assert_eq!(normalize_date("Mar 15, 2024").unwrap(), "15/03/2024");
        assert_eq!(normalize_date("March 15, 2024").unwrap(), "15/03/2024");
    }

    #[test]
    fn test_datetime_drops_time() {
        assert_eq!(normalize_date("2024-03-15 13:45:00").unwrap(), "15/03/2024");
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(normalize_date("  2024-03-15 ").unwrap(), "15/03/2024");
    }

    #[test]
    fn test_unparseable_is_an_error() {
        assert!(normalize_date("not a date").is_err());
        assert!(normalize_date("").is_err());
        assert!(normalize_date("2024-13-40").is_err());
    }

    #[test]
    fn test_error_carries_the_offending_value() {
        let err = normalize_date("garbage").unwrap_err();
        assert!(err.to_string().contains("garbage"));
    }
}
