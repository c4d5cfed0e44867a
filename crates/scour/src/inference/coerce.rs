//! Lenient value coercion.
//!
//! Every function here answers "what value is this, if any". Failure is
//! `None`, never an error: bad values are what the analyzer exists to find.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::Cell;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Cheap shape checks run before trying chrono formats one by one.

static DATE_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/.]\d{1,2}[-/.]\d{1,2}").unwrap(), // year first
        Regex::new(r"^\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}").unwrap(), // year last
        Regex::new(r"(?i)^(\d{1,2}\s+)?(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+\d{1,4}")
            .unwrap(), // month name
    ]
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parse a string as a finite number.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Best-effort date/datetime parse over common formats.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if !DATE_SHAPES.iter().any(|shape| shape.is_match(trimmed)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Coerce a cell to a number cell; anything that does not parse is absent.
pub fn coerce_number(cell: &Cell) -> Cell {
    match cell {
        Cell::Number(n) => Cell::Number(*n),
        Cell::Text(s) => parse_number(s).map(Cell::number).unwrap_or(Cell::Absent),
        Cell::Absent | Cell::Temporal(_) => Cell::Absent,
    }
}

/// Coerce a cell to a temporal cell; anything that does not parse is absent.
pub fn coerce_date(cell: &Cell) -> Cell {
    match cell {
        Cell::Temporal(t) => Cell::Temporal(*t),
        Cell::Text(s) => parse_date(s).map(Cell::Temporal).unwrap_or(Cell::Absent),
        Cell::Absent | Cell::Number(_) => Cell::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" 3.5 "), Some(3.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(parse_date("2024-01-15"), Some(expected));
        assert_eq!(parse_date("2024/01/15"), Some(expected));
        assert_eq!(parse_date("01/15/2024"), Some(expected));
        assert_eq!(parse_date("15/01/2024"), Some(expected));
        assert_eq!(parse_date("Jan 15, 2024"), Some(expected));
        assert_eq!(parse_date("15 January 2024"), Some(expected));
    }

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_date("2024-01-15 13:45:00").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "13:45");
        assert!(parse_date("2024-01-15T13:45:00Z").is_some());
    }

    #[test]
    fn test_parse_date_rejects_non_dates() {
        assert_eq!(parse_date("hello"), None);
        assert_eq!(parse_date("12345"), None);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date("May"), None);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&Cell::text("7")), Cell::Number(7.0));
        assert_eq!(coerce_number(&Cell::text("seven")), Cell::Absent);
        assert_eq!(coerce_number(&Cell::Number(1.0)), Cell::Number(1.0));
        assert_eq!(coerce_number(&Cell::Absent), Cell::Absent);
    }
}
