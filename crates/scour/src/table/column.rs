//! A named, kind-tagged column of cells.

use serde::Serialize;

use super::types::{Cell, ColumnKind};

/// A single column of a [`Table`](super::Table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared or classified kind.
    pub kind: ColumnKind,
    /// Values in row order.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Create a column from cells.
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Create a numeric column; `None` entries become absent cells.
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(
            name,
            ColumnKind::Numeric,
            values.into_iter().map(Cell::from).collect(),
        )
    }

    /// Create a text column; `None` entries become absent cells.
    pub fn text<'a>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Self {
        Self::new(
            name,
            ColumnKind::Text,
            values.into_iter().map(Cell::from).collect(),
        )
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of absent cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_absent()).count()
    }

    /// Iterate over non-absent cells with their row index.
    pub fn present(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_absent())
    }

    /// All finite numeric values in row order, skipping every other cell.
    pub fn numbers(&self) -> Vec<f64> {
        self.cells
            .iter()
            .filter_map(Cell::as_number)
            .filter(|n| n.is_finite())
            .collect()
    }

    /// Same name and kind, new cells.
    pub fn with_cells(&self, cells: Vec<Cell>) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            cells,
        }
    }

    /// Same column with a different kind tag.
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Apply `f` to every cell, producing a new column.
    pub fn map_cells(&self, f: impl FnMut(&Cell) -> Cell) -> Self {
        self.with_cells(self.cells.iter().map(f).collect())
    }
}
