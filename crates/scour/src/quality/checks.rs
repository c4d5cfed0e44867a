//! Individual quality checks.
//!
//! Each check looks at the whole table and returns zero or more findings of a
//! single kind. Checks never fail: values that do not parse are counted, not
//! raised.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::inference::{coerce_date, coerce_number};
use crate::summary::statistics::IqrBounds;
use crate::table::{Cell, CellKey, Column, ColumnKind, Table};

use super::finding::{Finding, FindingKind};
use super::policy::IdentifierPolicy;

/// Trait for a single quality check.
pub trait Check: Send + Sync {
    /// The kind of finding this check produces.
    fn kind(&self) -> FindingKind;

    /// Run the check and return findings.
    fn run(&self, table: &Table) -> Vec<Finding>;
}

fn text_columns(table: &Table) -> impl Iterator<Item = &Column> {
    table
        .columns()
        .iter()
        .filter(|c| c.kind == ColumnKind::Text)
}

/// Distinct rendered values of the non-absent cells, in first-seen order.
fn distinct_values(column: &Column) -> IndexSet<String> {
    column
        .present()
        .filter_map(|(_, cell)| cell.render())
        .collect()
}

/// Counts absent cells per column.
pub struct MissingValuesCheck;

impl Check for MissingValuesCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::MissingValues
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        table
            .columns()
            .iter()
            .filter_map(|column| {
                let count = column.missing_count();
                (count > 0).then(|| Finding::MissingValues {
                    column: column.name.clone(),
                    count,
                })
            })
            .collect()
    }
}

/// Detects rows identical to an earlier row.
pub struct DuplicateRowsCheck;

impl Check for DuplicateRowsCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::DuplicateRows
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        let mut seen = HashSet::new();
        let rows: Vec<usize> = (0..table.row_count())
            .filter(|&row| !seen.insert(table.row_key(row)))
            .collect();

        if rows.is_empty() {
            return Vec::new();
        }

        vec![Finding::DuplicateRows {
            count: rows.len(),
            rows,
        }]
    }
}

/// Detects leading or trailing whitespace in text columns.
pub struct WhitespaceCheck;

impl Check for WhitespaceCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::WhitespaceIssue
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        text_columns(table)
            .filter(|column| distinct_values(column).iter().any(|v| v.trim() != v))
            .map(|column| Finding::WhitespaceIssue {
                column: column.name.clone(),
            })
            .collect()
    }
}

/// Detects values that collapse together once trimmed and lowercased.
pub struct CasingCheck;

impl Check for CasingCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::CasingVariation
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        text_columns(table)
            .filter_map(|column| {
                let distinct = distinct_values(column);
                let normalized: HashSet<String> =
                    distinct.iter().map(|v| v.trim().to_lowercase()).collect();

                (normalized.len() < distinct.len()).then(|| Finding::CasingVariation {
                    column: column.name.clone(),
                    distinct: distinct.len(),
                    normalized: normalized.len(),
                })
            })
            .collect()
    }
}

/// Detects numbers stored as text.
pub struct WrongTypeCheck;

impl Check for WrongTypeCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::WrongType
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        text_columns(table)
            .filter_map(|column| {
                let coerced: Vec<Cell> = column.cells.iter().map(coerce_number).collect();
                let parseable = coerced.iter().filter(|c| !c.is_absent()).count();

                (parseable > 0 && coerced != column.cells).then(|| Finding::WrongType {
                    column: column.name.clone(),
                    parseable,
                })
            })
            .collect()
    }
}

/// Flags numeric values outside the IQR fences.
pub struct OutlierCheck {
    multiplier: f64,
    sample_size: usize,
}

impl OutlierCheck {
    pub fn new(multiplier: f64, sample_size: usize) -> Self {
        Self {
            multiplier,
            sample_size,
        }
    }
}

impl Default for OutlierCheck {
    fn default() -> Self {
        Self::new(1.5, 5)
    }
}

impl Check for OutlierCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::Outlier
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        let mut findings = Vec::new();

        for column in table.columns().iter().filter(|c| c.kind == ColumnKind::Numeric) {
            let values = column.numbers();
            let Some(bounds) = IqrBounds::compute(&values, self.multiplier) else {
                debug!(column = %column.name, "outliers not computable, no values");
                continue;
            };

            let outliers: Vec<f64> = values
                .iter()
                .copied()
                .filter(|v| bounds.is_outlier(*v))
                .collect();
            if outliers.is_empty() {
                continue;
            }

            findings.push(Finding::Outlier {
                column: column.name.clone(),
                count: outliers.len(),
                examples: outliers.into_iter().take(self.sample_size).collect(),
                q1: bounds.q1,
                q3: bounds.q3,
                lower_bound: bounds.lower,
                upper_bound: bounds.upper,
            });
        }

        findings
    }
}

/// Detects repeated values in identifier columns.
pub struct UniquenessCheck {
    policy: Arc<dyn IdentifierPolicy>,
    sample_size: usize,
}

impl UniquenessCheck {
    pub fn new(policy: Arc<dyn IdentifierPolicy>, sample_size: usize) -> Self {
        Self {
            policy,
            sample_size,
        }
    }
}

impl Check for UniquenessCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::UniquenessViolation
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        let mut findings = Vec::new();

        for column in table.columns() {
            if !self.policy.is_identifier(column) {
                continue;
            }

            let mut seen = HashSet::new();
            let mut duplicated: IndexMap<CellKey<'_>, &Cell> = IndexMap::new();
            for (_, cell) in column.present() {
                let key = cell.key();
                if !seen.insert(key) {
                    duplicated.entry(key).or_insert(cell);
                }
            }
            if duplicated.is_empty() {
                continue;
            }

            let examples: Vec<Cell> = duplicated
                .values()
                .take(self.sample_size)
                .map(|cell| (*cell).clone())
                .collect();

            findings.push(Finding::UniquenessViolation {
                column: column.name.clone(),
                count: duplicated.len(),
                examples,
            });
        }

        findings
    }
}

/// Detects text columns mixing parseable and unparseable dates.
pub struct DateFormatCheck;

impl Check for DateFormatCheck {
    fn kind(&self) -> FindingKind {
        FindingKind::DateFormatInconsistency
    }

    fn run(&self, table: &Table) -> Vec<Finding> {
        text_columns(table)
            .filter_map(|column| {
                let (parsed, unparsed) =
                    column
                        .present()
                        .fold((0usize, 0usize), |(parsed, unparsed), (_, cell)| {
                            if coerce_date(cell).is_absent() {
                                (parsed, unparsed + 1)
                            } else {
                                (parsed + 1, unparsed)
                            }
                        });

                (parsed > 0 && unparsed > 0).then(|| Finding::DateFormatInconsistency {
                    column: column.name.clone(),
                    parsed,
                    unparsed,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::policy::NameContains;

    fn make_table(columns: Vec<Column>) -> Table {
        Table::new(columns).unwrap()
    }

    #[test]
    fn test_missing_values() {
        let table = make_table(vec![
            Column::numeric("age", vec![Some(1.0), None, None]),
            Column::text("name", vec![Some("a"), Some("b"), Some("c")]),
        ]);
        let findings = MissingValuesCheck.run(&table);

        assert_eq!(
            findings,
            vec![Finding::MissingValues {
                column: "age".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_duplicate_rows_keep_first() {
        let table = make_table(vec![
            Column::text("name", vec![Some("a"), Some("b"), Some("a"), Some("a")]),
            Column::numeric("n", vec![Some(1.0), Some(2.0), Some(1.0), None]),
        ]);
        let findings = DuplicateRowsCheck.run(&table);

        assert_eq!(
            findings,
            vec![Finding::DuplicateRows {
                count: 1,
                rows: vec![2]
            }]
        );
    }

    #[test]
    fn test_duplicate_rows_treat_absent_as_equal() {
        let table = make_table(vec![Column::text("name", vec![None, None])]);
        assert_eq!(DuplicateRowsCheck.run(&table).len(), 1);
    }

    #[test]
    fn test_single_row_has_no_duplicates() {
        let table = make_table(vec![Column::text("name", vec![Some("a")])]);
        assert!(DuplicateRowsCheck.run(&table).is_empty());
    }

    #[test]
    fn test_whitespace_without_casing() {
        let table = make_table(vec![Column::text(
            "name",
            vec![Some("a"), Some("a "), Some(" a")],
        )]);

        assert_eq!(WhitespaceCheck.run(&table).len(), 1);
        // trimmed values collapse, so casing fires too
        assert_eq!(CasingCheck.run(&table).len(), 1);
    }

    #[test]
    fn test_casing_variation() {
        let table = make_table(vec![Column::text(
            "gender",
            vec![Some("Male"), Some("male"), Some("Female")],
        )]);
        let findings = CasingCheck.run(&table);

        assert_eq!(
            findings,
            vec![Finding::CasingVariation {
                column: "gender".to_string(),
                distinct: 3,
                normalized: 2
            }]
        );
        assert!(WhitespaceCheck.run(&table).is_empty());
    }

    #[test]
    fn test_text_checks_skip_numeric_columns() {
        let table = make_table(vec![Column::numeric("n", vec![Some(1.0), Some(1.0)])]);
        assert!(WhitespaceCheck.run(&table).is_empty());
        assert!(WrongTypeCheck.run(&table).is_empty());
        assert!(DateFormatCheck.run(&table).is_empty());
    }

    #[test]
    fn test_wrong_type() {
        let table = make_table(vec![
            Column::text("price", vec![Some("10"), Some("abc"), Some("3.5")]),
            Column::text("name", vec![Some("x"), Some("y"), Some("z")]),
        ]);
        let findings = WrongTypeCheck.run(&table);

        assert_eq!(
            findings,
            vec![Finding::WrongType {
                column: "price".to_string(),
                parseable: 2
            }]
        );
    }

    #[test]
    fn test_wrong_type_ignores_stored_numbers() {
        let column = Column::new(
            "mixed",
            ColumnKind::Text,
            vec![Cell::Number(1.0), Cell::Absent],
        );
        let table = make_table(vec![column]);
        assert!(WrongTypeCheck.run(&table).is_empty());
    }

    #[test]
    fn test_outliers() {
        let table = make_table(vec![Column::numeric(
            "value",
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(100.0)],
        )]);
        let findings = OutlierCheck::default().run(&table);

        match &findings[..] {
            [Finding::Outlier {
                count,
                examples,
                q1,
                q3,
                lower_bound,
                upper_bound,
                ..
            }] => {
                assert_eq!(*count, 1);
                assert_eq!(examples, &vec![100.0]);
                assert!((q1 - 2.25).abs() < 1e-9);
                assert!((q3 - 4.75).abs() < 1e-9);
                assert!((lower_bound + 1.5).abs() < 1e-9);
                assert!((upper_bound - 8.5).abs() < 1e-9);
            }
            other => panic!("unexpected findings: {:?}", other),
        }
    }

    #[test]
    fn test_outliers_all_absent_not_computable() {
        let table = make_table(vec![Column::numeric("value", vec![None, None])]);
        assert!(OutlierCheck::default().run(&table).is_empty());
    }

    #[test]
    fn test_uniqueness() {
        let table = make_table(vec![
            Column::numeric("employee_id", vec![Some(1.0), Some(2.0), Some(2.0), Some(3.0)]),
            Column::text("name", vec![Some("a"), Some("a"), Some("b"), Some("c")]),
        ]);
        let check = UniquenessCheck::new(Arc::new(NameContains::default()), 5);
        let findings = check.run(&table);

        assert_eq!(
            findings,
            vec![Finding::UniquenessViolation {
                column: "employee_id".to_string(),
                count: 1,
                examples: vec![Cell::Number(2.0)]
            }]
        );
    }

    #[test]
    fn test_uniqueness_ignores_absent() {
        let table = make_table(vec![Column::numeric("id", vec![None, None, Some(1.0)])]);
        let check = UniquenessCheck::new(Arc::new(NameContains::default()), 5);
        assert!(check.run(&table).is_empty());
    }

    #[test]
    fn test_uniqueness_examples_in_repeat_order() {
        let table = make_table(vec![Column::text(
            "sku_id",
            vec![Some("a"), Some("b"), Some("b"), Some("a")],
        )]);
        let check = UniquenessCheck::new(Arc::new(NameContains::default()), 5);

        match &check.run(&table)[..] {
            [Finding::UniquenessViolation { count, examples, .. }] => {
                assert_eq!(*count, 2);
                assert_eq!(examples, &vec![Cell::text("b"), Cell::text("a")]);
            }
            other => panic!("unexpected findings: {:?}", other),
        }
    }

    #[test]
    fn test_date_format_inconsistency() {
        let table = make_table(vec![
            Column::text("joined", vec![Some("2024-01-15"), Some("not a date"), None]),
            Column::text("notes", vec![Some("hello"), Some("world"), None]),
        ]);
        let findings = DateFormatCheck.run(&table);

        assert_eq!(
            findings,
            vec![Finding::DateFormatInconsistency {
                column: "joined".to_string(),
                parsed: 1,
                unparsed: 1
            }]
        );
    }
}
