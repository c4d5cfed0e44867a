//! Per-column descriptive statistics.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use crate::table::{Cell, Column, ColumnKind, Table};

use super::statistics;

/// Number of most frequent values reported for text columns.
pub const TOP_VALUES: usize = 5;

/// Statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std_dev: Option<f64>,
    pub modes: Vec<f64>,
}

/// A value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Statistics for a text column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub unique: usize,
    /// Distinct values as a percentage of all rows; `None` for zero rows.
    pub unique_percent: Option<f64>,
    pub top_values: Vec<ValueCount>,
}

/// Statistics for a temporal column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalSummary {
    pub min: Option<NaiveDateTime>,
    pub max: Option<NaiveDateTime>,
    pub unique: usize,
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    /// Non-absent cells.
    pub count: usize,
    pub missing: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalSummary>,
}

/// Computes [`ColumnSummary`] values for every column of a table.
#[derive(Debug, Clone)]
pub struct ColumnSummarizer {
    top_values: usize,
}

impl ColumnSummarizer {
    pub fn new() -> Self {
        Self {
            top_values: TOP_VALUES,
        }
    }

    /// Set how many frequent text values to report.
    pub fn with_top_values(mut self, top_values: usize) -> Self {
        self.top_values = top_values;
        self
    }

    /// Summarize every column, in column order.
    pub fn summarize(&self, table: &Table) -> Vec<ColumnSummary> {
        table
            .columns()
            .iter()
            .map(|column| self.summarize_column(column))
            .collect()
    }

    /// Summarize one column.
    pub fn summarize_column(&self, column: &Column) -> ColumnSummary {
        let missing = column.missing_count();
        let mut summary = ColumnSummary {
            name: column.name.clone(),
            kind: column.kind,
            count: column.len() - missing,
            missing,
            numeric: None,
            text: None,
            temporal: None,
        };

        match column.kind {
            ColumnKind::Numeric => summary.numeric = Some(numeric_summary(column)),
            ColumnKind::Text => summary.text = Some(self.text_summary(column)),
            ColumnKind::Temporal => summary.temporal = Some(temporal_summary(column)),
            ColumnKind::Unknown => {}
        }

        summary
    }

    fn text_summary(&self, column: &Column) -> TextSummary {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for (_, cell) in column.present() {
            if let Some(value) = cell.render() {
                *counts.entry(value).or_insert(0) += 1;
            }
        }

        let unique = counts.len();
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        // stable: ties keep first-appearance order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let unique_percent = (column.len() > 0).then(|| unique as f64 / column.len() as f64 * 100.0);

        TextSummary {
            unique,
            unique_percent,
            top_values: ranked
                .into_iter()
                .take(self.top_values)
                .map(|(value, count)| ValueCount { value, count })
                .collect(),
        }
    }
}

impl Default for ColumnSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric_summary(column: &Column) -> NumericSummary {
    let values = column.numbers();
    NumericSummary {
        mean: statistics::mean(&values),
        median: statistics::median(&values),
        min: statistics::min(&values),
        max: statistics::max(&values),
        std_dev: statistics::sample_std(&values),
        modes: statistics::modes(&values),
    }
}

fn temporal_summary(column: &Column) -> TemporalSummary {
    let values: Vec<NaiveDateTime> = column.cells.iter().filter_map(Cell::as_temporal).collect();
    let unique = values.iter().collect::<HashSet<_>>().len();

    TemporalSummary {
        min: values.iter().min().copied(),
        max: values.iter().max().copied(),
        unique,
    }
}

/// Summarize every column of `table` with default settings.
pub fn summarize(table: &Table) -> Vec<ColumnSummary> {
    ColumnSummarizer::new().summarize(table)
}
