//! Defect taxonomy shared by the analyzer and the remediator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::Cell;

/// Kind of data-quality defect.
///
/// Variant order is the analyzer's evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Absent cells in a column.
    MissingValues,
    /// Rows identical to an earlier row.
    DuplicateRows,
    /// Leading/trailing whitespace in text values.
    WhitespaceIssue,
    /// Values that differ only by case (or surrounding space).
    CasingVariation,
    /// Numbers stored as text.
    WrongType,
    /// Values outside the IQR fences.
    Outlier,
    /// Repeated values in an identifier column.
    UniquenessViolation,
    /// Text column mixing parseable and unparseable dates.
    DateFormatInconsistency,
}

impl FindingKind {
    /// Every kind, in evaluation order.
    pub const ALL: [FindingKind; 8] = [
        FindingKind::MissingValues,
        FindingKind::DuplicateRows,
        FindingKind::WhitespaceIssue,
        FindingKind::CasingVariation,
        FindingKind::WrongType,
        FindingKind::Outlier,
        FindingKind::UniquenessViolation,
        FindingKind::DateFormatInconsistency,
    ];

    /// Get a human-readable label for the finding kind.
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::MissingValues => "Missing Values",
            FindingKind::DuplicateRows => "Duplicate Rows",
            FindingKind::WhitespaceIssue => "Whitespace Issue",
            FindingKind::CasingVariation => "Casing Variation",
            FindingKind::WrongType => "Wrong Type",
            FindingKind::Outlier => "Outlier",
            FindingKind::UniquenessViolation => "Uniqueness Violation",
            FindingKind::DateFormatInconsistency => "Date Format Inconsistency",
        }
    }
}

/// A single detected defect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    MissingValues {
        column: String,
        count: usize,
    },
    DuplicateRows {
        count: usize,
        /// Zero-based indices of the duplicate (non-first) rows.
        rows: Vec<usize>,
    },
    WhitespaceIssue {
        column: String,
    },
    CasingVariation {
        column: String,
        /// Distinct raw values.
        distinct: usize,
        /// Distinct values after trim + lowercase.
        normalized: usize,
    },
    WrongType {
        column: String,
        /// Values that coerce to a number.
        parseable: usize,
    },
    Outlier {
        column: String,
        count: usize,
        examples: Vec<f64>,
        q1: f64,
        q3: f64,
        lower_bound: f64,
        upper_bound: f64,
    },
    UniquenessViolation {
        column: String,
        /// Number of distinct duplicated values.
        count: usize,
        examples: Vec<Cell>,
    },
    DateFormatInconsistency {
        column: String,
        parsed: usize,
        unparsed: usize,
    },
}

impl Finding {
    /// The defect kind.
    pub fn kind(&self) -> FindingKind {
        match self {
            Finding::MissingValues { .. } => FindingKind::MissingValues,
            Finding::DuplicateRows { .. } => FindingKind::DuplicateRows,
            Finding::WhitespaceIssue { .. } => FindingKind::WhitespaceIssue,
            Finding::CasingVariation { .. } => FindingKind::CasingVariation,
            Finding::WrongType { .. } => FindingKind::WrongType,
            Finding::Outlier { .. } => FindingKind::Outlier,
            Finding::UniquenessViolation { .. } => FindingKind::UniquenessViolation,
            Finding::DateFormatInconsistency { .. } => FindingKind::DateFormatInconsistency,
        }
    }

    /// The affected column; `None` for table-wide findings.
    pub fn column(&self) -> Option<&str> {
        match self {
            Finding::DuplicateRows { .. } => None,
            Finding::MissingValues { column, .. }
            | Finding::WhitespaceIssue { column }
            | Finding::CasingVariation { column, .. }
            | Finding::WrongType { column, .. }
            | Finding::Outlier { column, .. }
            | Finding::UniquenessViolation { column, .. }
            | Finding::DateFormatInconsistency { column, .. } => Some(column),
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> String {
        match self {
            Finding::MissingValues { column, count } => {
                format!("Column '{}' has {} missing value(s)", column, count)
            }
            Finding::DuplicateRows { count, .. } => {
                format!("{} duplicate row(s) detected", count)
            }
            Finding::WhitespaceIssue { column } => {
                format!("Column '{}' has leading/trailing whitespace", column)
            }
            Finding::CasingVariation {
                column,
                distinct,
                normalized,
            } => format!(
                "Column '{}' has casing variations ({} distinct values collapse to {})",
                column, distinct, normalized
            ),
            Finding::WrongType { column, parseable } => format!(
                "Column '{}' stores numbers as text ({} value(s) parse as numbers)",
                column, parseable
            ),
            Finding::Outlier {
                column,
                count,
                examples,
                lower_bound,
                upper_bound,
                ..
            } => format!(
                "Column '{}' has {} outlier(s) outside [{}, {}] (e.g. {})",
                column,
                count,
                lower_bound,
                upper_bound,
                join_values(examples.iter().map(|v| v.to_string()))
            ),
            Finding::UniquenessViolation {
                column,
                count,
                examples,
            } => format!(
                "Column '{}' (potential ID) has {} duplicated value(s) (e.g. {})",
                column,
                count,
                join_values(examples.iter().map(|c| c.to_string()))
            ),
            Finding::DateFormatInconsistency {
                column,
                parsed,
                unparsed,
            } => format!(
                "Column '{}' mixes date values ({} parsed) with {} unparseable value(s)",
                column, parsed, unparsed
            ),
        }
    }
}

fn join_values(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

/// The complete result of one analysis pass, grouped by kind.
///
/// Built only by the analyzer; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FindingSet {
    findings: IndexMap<FindingKind, Vec<Finding>>,
}

impl FindingSet {
    /// Create an empty finding set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, finding: Finding) {
        self.findings.entry(finding.kind()).or_default().push(finding);
    }

    /// Returns true when no defect was found.
    pub fn is_empty(&self) -> bool {
        self.findings.values().all(Vec::is_empty)
    }

    /// Total number of findings.
    pub fn len(&self) -> usize {
        self.findings.values().map(Vec::len).sum()
    }

    /// Check if any finding of `kind` exists.
    pub fn contains(&self, kind: FindingKind) -> bool {
        !self.get(kind).is_empty()
    }

    /// Findings of one kind.
    pub fn get(&self, kind: FindingKind) -> &[Finding] {
        self.findings.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kinds present, in evaluation order.
    pub fn kinds(&self) -> impl Iterator<Item = FindingKind> + '_ {
        self.findings
            .iter()
            .filter(|(_, findings)| !findings.is_empty())
            .map(|(kind, _)| *kind)
    }

    /// All findings, grouped by kind in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.findings.values().flatten()
    }

    /// Columns named by findings of `kind`, in column order.
    pub fn columns(&self, kind: FindingKind) -> Vec<&str> {
        self.get(kind).iter().filter_map(Finding::column).collect()
    }

    /// Check if `column` has a finding of `kind`.
    pub fn flags(&self, kind: FindingKind, column: &str) -> bool {
        self.get(kind).iter().any(|f| f.column() == Some(column))
    }

    /// Row indices reported as duplicate rows.
    pub fn duplicate_rows(&self) -> &[usize] {
        self.get(FindingKind::DuplicateRows)
            .iter()
            .find_map(|f| match f {
                Finding::DuplicateRows { rows, .. } => Some(rows.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Missing-value count reported for `column` (0 when not reported).
    pub fn missing_count(&self, column: &str) -> usize {
        self.get(FindingKind::MissingValues)
            .iter()
            .find_map(|f| match f {
                Finding::MissingValues { column: c, count } if c == column => Some(*count),
                _ => None,
            })
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a FindingSet {
    type Item = &'a Finding;
    type IntoIter = std::iter::Flatten<indexmap::map::Values<'a, FindingKind, Vec<Finding>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.values().flatten()
    }
}
