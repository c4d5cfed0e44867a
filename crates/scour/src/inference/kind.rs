//! Column kind classification from raw strings.

use crate::table::{Cell, Column, ColumnKind};

use super::coerce::{parse_date, parse_number};

/// Tokens treated as missing values when reading raw data.
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "-",
];

/// Classifies raw string columns into kind-tagged columns.
///
/// The kind is decided once here and never re-probed downstream.
#[derive(Debug, Clone)]
pub struct KindClassifier {
    null_tokens: Vec<String>,
}

impl KindClassifier {
    /// Create a classifier with the default null tokens.
    pub fn new() -> Self {
        Self::with_null_tokens(DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect())
    }

    /// Create a classifier with custom null tokens.
    pub fn with_null_tokens(null_tokens: Vec<String>) -> Self {
        Self { null_tokens }
    }

    /// Check if a raw value represents a missing value.
    pub fn is_null_value(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || self.null_tokens.iter().any(|t| t == trimmed)
    }

    /// Decide the kind of a column from its raw values.
    pub fn classify_kind(&self, values: &[&str]) -> ColumnKind {
        let mut present = values.iter().filter(|v| !self.is_null_value(v)).peekable();
        if present.peek().is_none() {
            return ColumnKind::Unknown;
        }

        let present: Vec<&&str> = present.collect();
        if present.iter().all(|v| parse_number(v).is_some()) {
            ColumnKind::Numeric
        } else if present.iter().all(|v| parse_date(v).is_some()) {
            ColumnKind::Temporal
        } else {
            ColumnKind::Text
        }
    }

    /// Build a column from raw values, classifying its kind.
    pub fn build_column(&self, name: impl Into<String>, values: &[&str]) -> Column {
        let kind = self.classify_kind(values);

        let cells = values
            .iter()
            .map(|raw| {
                if self.is_null_value(raw) {
                    return Cell::Absent;
                }
                match kind {
                    ColumnKind::Numeric => parse_number(raw).map(Cell::number).unwrap_or(Cell::Absent),
                    ColumnKind::Temporal => parse_date(raw).map(Cell::Temporal).unwrap_or(Cell::Absent),
                    ColumnKind::Text => Cell::text(*raw),
                    ColumnKind::Unknown => Cell::Absent,
                }
            })
            .collect();

        Column::new(name, kind, cells)
    }
}

impl Default for KindClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_value() {
        let classifier = KindClassifier::new();
        assert!(classifier.is_null_value(""));
        assert!(classifier.is_null_value("  "));
        assert!(classifier.is_null_value("NA"));
        assert!(classifier.is_null_value("N/A"));
        assert!(classifier.is_null_value("null"));
        assert!(!classifier.is_null_value("value"));
        assert!(!classifier.is_null_value("0"));
    }

    #[test]
    fn test_classify_numeric() {
        let classifier = KindClassifier::new();
        let column = classifier.build_column("age", &["25", "", "30.5"]);

        assert_eq!(column.kind, ColumnKind::Numeric);
        assert_eq!(column.cells, vec![Cell::Number(25.0), Cell::Absent, Cell::Number(30.5)]);
    }

    #[test]
    fn test_classify_mixed_as_text() {
        let classifier = KindClassifier::new();
        let column = classifier.build_column("age", &["25", "thirty", " 40 "]);

        assert_eq!(column.kind, ColumnKind::Text);
        assert_eq!(column.cells[2], Cell::text(" 40 "));
    }

    #[test]
    fn test_classify_temporal() {
        let classifier = KindClassifier::new();
        let column = classifier.build_column("visit", &["2024-01-15", "2024-02-01", "NA"]);

        assert_eq!(column.kind, ColumnKind::Temporal);
        assert!(column.cells[0].as_temporal().is_some());
        assert!(column.cells[2].is_absent());
    }

    #[test]
    fn test_classify_all_missing_as_unknown() {
        let classifier = KindClassifier::new();
        assert_eq!(classifier.classify_kind(&["", "NA"]), ColumnKind::Unknown);
        assert_eq!(classifier.classify_kind(&[]), ColumnKind::Unknown);
    }

    #[test]
    fn test_custom_null_tokens() {
        let classifier = KindClassifier::with_null_tokens(vec!["missing".to_string()]);
        let column = classifier.build_column("status", &["missing", "NA"]);

        assert!(column.cells[0].is_absent());
        assert_eq!(column.cells[1], Cell::text("NA"));
    }
}
