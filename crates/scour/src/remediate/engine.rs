//! Remediation engine that turns findings into a cleaned table.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::inference::coerce_number;
use crate::quality::{FindingKind, FindingSet};
use crate::summary::statistics;
use crate::table::{Cell, Column, ColumnKind, Table};

use super::operations::{ActionLog, ActionRecord, RemediationStep};

/// Which columns the imputation step fills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationScope {
    /// Only columns named by the MissingValues findings.
    Reported,
    /// Those columns plus wrong-type columns that gained absent cells when
    /// coerced.
    #[default]
    ReportedAndCoerced,
}

/// Remediator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationConfig {
    pub imputation_scope: ImputationScope,
    /// Fill value for text columns with no value to take a mode from.
    pub fill_sentinel: String,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            imputation_scope: ImputationScope::default(),
            fill_sentinel: "Unknown".to_string(),
        }
    }
}

/// A cleaned table and the log of how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Remediation {
    pub table: Table,
    pub log: ActionLog,
}

/// Applies the safe, automatic fixes for a [`FindingSet`].
#[derive(Debug, Clone, Default)]
pub struct Remediator {
    config: RemediationConfig,
}

impl Remediator {
    /// Create a remediator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a remediator from settings.
    pub fn with_config(config: RemediationConfig) -> Self {
        Self { config }
    }

    /// Get the remediator settings.
    pub fn config(&self) -> &RemediationConfig {
        &self.config
    }

    /// Apply every fix, in order, to a copy of `table`.
    ///
    /// `findings` must come from analyzing `table`; the input is never
    /// modified.
    pub fn remediate(&self, table: &Table, findings: &FindingSet) -> Remediation {
        let mut log = ActionLog::new();
        let rows_before = table.row_count();

        let table = remove_duplicate_rows(table, findings, &mut log);
        let table = trim_whitespace(&table, findings, &mut log);
        let table = normalize_casing(&table, findings, &mut log);
        let (table, coerced) = coerce_numeric(&table, findings, &mut log);

        let mut targets: Vec<&str> = findings.columns(FindingKind::MissingValues);
        if self.config.imputation_scope == ImputationScope::ReportedAndCoerced {
            for column in &coerced {
                if !targets.contains(&column.as_str()) {
                    targets.push(column.as_str());
                }
            }
        }
        let table = impute_missing(&table, &targets, &self.config.fill_sentinel, &mut log);
        let table = enforce_uniqueness(&table, findings, &mut log);
        record_report_only(findings, &mut log);

        info!(
            rows_before,
            rows_after = table.row_count(),
            actions = log.len(),
            "remediation complete"
        );

        Remediation { table, log }
    }
}

/// Remediate `table` with default settings.
pub fn remediate(table: &Table, findings: &FindingSet) -> Remediation {
    Remediator::new().remediate(table, findings)
}

fn record(log: &mut ActionLog, action: ActionRecord) {
    if action.outcome.is_applied() {
        debug!(step = action.step.label(), column = ?action.column, "{}", action.description);
    } else {
        warn!(step = action.step.label(), column = ?action.column, "{}", action.description);
    }
    log.record(action);
}

/// Resolve a finding's column against the current table, logging a skip if
/// it is gone.
fn locate<'t>(
    table: &'t Table,
    step: RemediationStep,
    column: &str,
    log: &mut ActionLog,
) -> Option<(usize, &'t Column)> {
    let found = table
        .column_index(column)
        .and_then(|i| table.columns().get(i).map(|c| (i, c)));
    if found.is_none() {
        record(log, ActionRecord::skipped(step, Some(column), "column not found"));
    }
    found
}

fn remove_duplicate_rows(table: &Table, findings: &FindingSet, log: &mut ActionLog) -> Table {
    let rows = findings.duplicate_rows();
    if rows.is_empty() {
        return table.clone();
    }

    let mut keep = vec![true; table.row_count()];
    for &row in rows {
        if let Some(slot) = keep.get_mut(row) {
            *slot = false;
        }
    }
    let removed = keep.iter().filter(|k| !**k).count();

    record(
        log,
        ActionRecord::applied(
            RemediationStep::RemoveDuplicateRows,
            None,
            format!("Removed {} duplicate row(s)", removed),
        )
        .with_rows_removed(removed),
    );
    table.retain_rows(&keep)
}

/// Rewrite the text cells of every column flagged with `kind`.
fn rewrite_text(
    table: &Table,
    findings: &FindingSet,
    kind: FindingKind,
    step: RemediationStep,
    log: &mut ActionLog,
    rewrite: impl Fn(&str) -> String,
) -> Table {
    let mut table = table.clone();

    for name in findings.columns(kind) {
        let Some((index, column)) = locate(&table, step, name, log) else {
            continue;
        };

        let mut changed = 0;
        let cleaned = column.map_cells(|cell| match cell {
            Cell::Text(s) => {
                let new = rewrite(s);
                if new != *s {
                    changed += 1;
                }
                Cell::Text(new)
            }
            other => other.clone(),
        });

        record(
            log,
            ActionRecord::applied(
                step,
                Some(name),
                format!("{} in '{}': {} value(s) changed", step.label(), name, changed),
            )
            .with_values_changed(changed),
        );
        table = table.replace_column(index, cleaned);
    }

    table
}

fn trim_whitespace(table: &Table, findings: &FindingSet, log: &mut ActionLog) -> Table {
    rewrite_text(
        table,
        findings,
        FindingKind::WhitespaceIssue,
        RemediationStep::TrimWhitespace,
        log,
        |s| s.trim().to_string(),
    )
}

fn normalize_casing(table: &Table, findings: &FindingSet, log: &mut ActionLog) -> Table {
    rewrite_text(
        table,
        findings,
        FindingKind::CasingVariation,
        RemediationStep::NormalizeCasing,
        log,
        str::to_lowercase,
    )
}

/// Coerce wrong-type columns to numbers.
///
/// Returns the new table and the columns that gained absent cells.
fn coerce_numeric(table: &Table, findings: &FindingSet, log: &mut ActionLog) -> (Table, Vec<String>) {
    let step = RemediationStep::CoerceNumeric;
    let mut table = table.clone();
    let mut gained_missing = Vec::new();

    for name in findings.columns(FindingKind::WrongType) {
        let Some((index, column)) = locate(&table, step, name, log) else {
            continue;
        };

        let coerced = column.map_cells(coerce_number).with_kind(ColumnKind::Numeric);
        let (converted, new_missing) = column.cells.iter().zip(&coerced.cells).fold(
            (0usize, 0usize),
            |(converted, new_missing), (before, after)| match (before, after) {
                (Cell::Text(_), Cell::Number(_)) => (converted + 1, new_missing),
                (before, Cell::Absent) if !before.is_absent() => (converted, new_missing + 1),
                _ => (converted, new_missing),
            },
        );

        record(
            log,
            ActionRecord::applied(
                step,
                Some(name),
                format!(
                    "Converted '{}' to numeric: {} value(s) converted, {} became missing",
                    name, converted, new_missing
                ),
            )
            .with_values_changed(converted + new_missing),
        );
        if new_missing > 0 {
            gained_missing.push(name.to_string());
        }
        table = table.replace_column(index, coerced);
    }

    (table, gained_missing)
}

/// Most frequent rendered value; ties go to the smallest value.
fn text_mode(column: &Column) -> Option<String> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for (_, cell) in column.present() {
        if let Some(value) = cell.render() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(a, a_count), (b, b_count)| a_count.cmp(b_count).then_with(|| b.cmp(a)))
        .map(|(value, _)| value)
}

fn impute_missing(table: &Table, targets: &[&str], sentinel: &str, log: &mut ActionLog) -> Table {
    let step = RemediationStep::ImputeMissing;
    let mut table = table.clone();

    for &name in targets {
        let Some((index, column)) = locate(&table, step, name, log) else {
            continue;
        };

        let missing = column.missing_count();
        if missing == 0 {
            record(log, ActionRecord::skipped(step, Some(name), "no missing values remain"));
            continue;
        }

        let (fill, how) = match column.kind {
            ColumnKind::Numeric => match statistics::mean(&column.numbers()) {
                Some(mean) => (Cell::number(mean), format!("mean {}", mean)),
                None => {
                    record(log, ActionRecord::skipped(step, Some(name), "not computable"));
                    continue;
                }
            },
            ColumnKind::Text => match text_mode(column) {
                Some(mode) => {
                    let how = format!("mode '{}'", mode);
                    (Cell::Text(mode), how)
                }
                None => (Cell::text(sentinel), format!("'{}'", sentinel)),
            },
            ColumnKind::Temporal | ColumnKind::Unknown => {
                let reason = format!("unsupported column kind: {}", column.kind);
                record(log, ActionRecord::skipped(step, Some(name), reason));
                continue;
            }
        };

        let filled = column.map_cells(|cell| {
            if cell.is_absent() {
                fill.clone()
            } else {
                cell.clone()
            }
        });

        record(
            log,
            ActionRecord::applied(
                step,
                Some(name),
                format!("Filled {} missing value(s) in '{}' with {}", missing, name, how),
            )
            .with_values_changed(missing),
        );
        table = table.replace_column(index, filled);
    }

    table
}

fn enforce_uniqueness(table: &Table, findings: &FindingSet, log: &mut ActionLog) -> Table {
    let step = RemediationStep::EnforceUniqueness;
    let mut table = table.clone();

    for name in findings.columns(FindingKind::UniquenessViolation) {
        let Some((_, column)) = locate(&table, step, name, log) else {
            continue;
        };

        let mut seen = HashSet::new();
        let keep: Vec<bool> = column
            .cells
            .iter()
            .map(|cell| cell.is_absent() || seen.insert(cell.key()))
            .collect();
        let removed = keep.iter().filter(|k| !**k).count();

        record(
            log,
            ActionRecord::applied(
                step,
                Some(name),
                format!("Removed {} row(s) repeating a value of '{}'", removed, name),
            )
            .with_rows_removed(removed),
        );
        table = table.retain_rows(&keep);
    }

    table
}

fn record_report_only(findings: &FindingSet, log: &mut ActionLog) {
    let reviewed = findings
        .get(FindingKind::Outlier)
        .iter()
        .chain(findings.get(FindingKind::DateFormatInconsistency));

    for finding in reviewed {
        let step = RemediationStep::ReportOnly(finding.kind());
        let mut action = ActionRecord::skipped(step, finding.column(), "report only");
        action.description = format!("{} (report only)", finding.description());
        record(log, action);
    }
}
