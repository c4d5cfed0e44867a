//! Remediation steps and the action log they produce.

use serde::{Deserialize, Serialize};

use crate::quality::FindingKind;

/// A remediation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationStep {
    /// Drop rows identical to an earlier row.
    RemoveDuplicateRows,
    /// Trim leading/trailing whitespace from text cells.
    TrimWhitespace,
    /// Lowercase text cells.
    NormalizeCasing,
    /// Convert a text column to numbers.
    CoerceNumeric,
    /// Fill absent cells with the mean or the mode.
    ImputeMissing,
    /// Drop rows repeating an identifier value.
    EnforceUniqueness,
    /// Finding kept for review, no change made.
    ReportOnly(FindingKind),
}

impl RemediationStep {
    /// Get a human-readable label for the step.
    pub fn label(&self) -> &'static str {
        match self {
            RemediationStep::RemoveDuplicateRows => "Remove duplicate rows",
            RemediationStep::TrimWhitespace => "Trim whitespace",
            RemediationStep::NormalizeCasing => "Normalize casing",
            RemediationStep::CoerceNumeric => "Coerce to numeric",
            RemediationStep::ImputeMissing => "Impute missing values",
            RemediationStep::EnforceUniqueness => "Enforce uniqueness",
            RemediationStep::ReportOnly(_) => "Report only",
        }
    }
}

/// Whether a step changed the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Skipped { reason: String },
}

impl Outcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Outcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// One entry of the action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Step taken.
    pub step: RemediationStep,

    /// Column affected, if the step is column-scoped.
    pub column: Option<String>,

    /// Applied or skipped.
    pub outcome: Outcome,

    /// Rows dropped by this step.
    pub rows_removed: usize,

    /// Cells rewritten by this step.
    pub values_changed: usize,

    /// Description of the action.
    pub description: String,
}

impl ActionRecord {
    /// An applied step.
    pub fn applied(step: RemediationStep, column: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            step,
            column: column.map(str::to_string),
            outcome: Outcome::Applied,
            rows_removed: 0,
            values_changed: 0,
            description: description.into(),
        }
    }

    /// A skipped step.
    pub fn skipped(step: RemediationStep, column: Option<&str>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let description = match column {
            Some(column) => format!("{} '{}': skipped ({})", step.label(), column, reason),
            None => format!("{}: skipped ({})", step.label(), reason),
        };
        Self {
            step,
            column: column.map(str::to_string),
            outcome: Outcome::skipped(reason),
            rows_removed: 0,
            values_changed: 0,
            description,
        }
    }

    pub fn with_rows_removed(mut self, rows: usize) -> Self {
        self.rows_removed = rows;
        self
    }

    pub fn with_values_changed(mut self, values: usize) -> Self {
        self.values_changed = values;
        self
    }
}

/// Ordered record of everything a remediation pass did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    /// Actions in the order they ran.
    pub actions: Vec<ActionRecord>,
}

impl ActionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn record(&mut self, action: ActionRecord) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter()
    }

    /// Actions that changed the table.
    pub fn applied(&self) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().filter(|a| a.outcome.is_applied())
    }

    /// Actions that were skipped.
    pub fn skipped(&self) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().filter(|a| !a.outcome.is_applied())
    }

    /// Total rows removed.
    pub fn rows_removed(&self) -> usize {
        self.actions.iter().map(|a| a.rows_removed).sum()
    }

    /// Rows removed by one step.
    pub fn rows_removed_by(&self, step: RemediationStep) -> usize {
        self.actions
            .iter()
            .filter(|a| a.step == step)
            .map(|a| a.rows_removed)
            .sum()
    }

    /// Total cells rewritten.
    pub fn values_changed(&self) -> usize {
        self.actions.iter().map(|a| a.values_changed).sum()
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a ActionRecord;
    type IntoIter = std::slice::Iter<'a, ActionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
