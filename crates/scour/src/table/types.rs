//! Core cell and column-kind definitions.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

/// Format used when rendering temporal cells as text.
pub const TEMPORAL_RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Semantic category of a column's values.
///
/// Decided once when the column is built and dispatched over by every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Numbers (integers and floats alike).
    Numeric,
    /// Free or categorical text.
    Text,
    /// Dates and datetimes.
    Temporal,
    /// Nothing to go on (e.g. every value missing).
    Unknown,
}

impl ColumnKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Temporal => "temporal",
            ColumnKind::Unknown => "unknown",
        }
    }
}

impl Default for ColumnKind {
    fn default() -> Self {
        ColumnKind::Unknown
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single value in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value.
    Absent,
    /// Finite number.
    Number(f64),
    /// Text, stored exactly as read.
    Text(String),
    /// Date or datetime.
    Temporal(NaiveDateTime),
}

impl Cell {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Build a numeric cell. Non-finite inputs become absent.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            // -0.0 and 0.0 must compare and hash as one value
            Cell::Number(if value == 0.0 { 0.0 } else { value })
        } else {
            Cell::Absent
        }
    }

    /// Returns true if the cell holds no value.
    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }

    /// Get the numeric value, if this is a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text value, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the temporal value, if this is a temporal cell.
    pub fn as_temporal(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Temporal(t) => Some(*t),
            _ => None,
        }
    }

    /// Textual form of the value; `None` for absent cells.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Absent => None,
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => Some(s.clone()),
            Cell::Temporal(t) => Some(t.format(TEMPORAL_RENDER_FORMAT).to_string()),
        }
    }

    /// Hashable identity of the cell, used for duplicate detection.
    pub fn key(&self) -> CellKey<'_> {
        match self {
            Cell::Absent => CellKey::Absent,
            Cell::Number(n) => CellKey::Number(n.to_bits()),
            Cell::Text(s) => CellKey::Text(s.as_str()),
            Cell::Temporal(t) => CellKey::Temporal(*t),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(s) => f.write_str(&s),
            None => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Absent => serializer.serialize_none(),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Temporal(t) => {
                serializer.serialize_str(&t.format(TEMPORAL_RENDER_FORMAT).to_string())
            }
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Absent)
    }
}

/// Borrowed, hashable view of a cell.
///
/// Numbers are keyed by bit pattern; [`Cell::number`] guarantees they are
/// finite and that zero has a single representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Absent,
    Number(u64),
    Text(&'a str),
    Temporal(NaiveDateTime),
}
