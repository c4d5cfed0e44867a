//! Rectangular, column-major table.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, ScourError};

use super::column::Column;
use super::types::{Cell, CellKey};

/// An ordered set of equally long, uniquely named columns.
///
/// Tables are values: every transformation returns a new table and leaves
/// the receiver untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, rejecting ragged columns and repeated names.
    ///
    /// Number cells are passed through [`Cell::number`]: non-finite values
    /// become absent and `-0.0` becomes `0.0`.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let columns: Vec<Column> = columns.into_iter().map(normalize_numbers).collect();
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ScourError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != row_count {
                return Err(ScourError::ColumnLengthMismatch {
                    column: column.name.clone(),
                    expected: row_count,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns, row_count })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column's position by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.columns.get(col).and_then(|c| c.cells.get(row))
    }

    /// Cells of one row, in column order.
    pub fn row(&self, row: usize) -> Vec<&Cell> {
        self.columns.iter().filter_map(|c| c.cells.get(row)).collect()
    }

    /// Hashable identity of a whole row.
    pub fn row_key(&self, row: usize) -> Vec<CellKey<'_>> {
        self.columns
            .iter()
            .filter_map(|c| c.cells.get(row).map(Cell::key))
            .collect()
    }

    /// New table keeping only rows whose flag is true.
    ///
    /// `keep` must have one entry per row; missing entries count as kept.
    pub fn retain_rows(&self, keep: &[bool]) -> Self {
        let kept = |i: usize| keep.get(i).copied().unwrap_or(true);
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|column| {
                column.with_cells(
                    column
                        .cells
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| kept(*i))
                        .map(|(_, cell)| cell.clone())
                        .collect(),
                )
            })
            .collect();
        let row_count = (0..self.row_count).filter(|i| kept(*i)).count();

        Self { columns, row_count }
    }

    /// New table with the column at `index` replaced.
    ///
    /// The replacement must keep the name and length of the original; callers
    /// inside the crate build it with [`Column::with_cells`] or
    /// [`Column::map_cells`].
    pub(crate) fn replace_column(&self, index: usize, column: Column) -> Self {
        debug_assert_eq!(column.len(), self.row_count);
        let mut columns = self.columns.clone();
        if let Some(slot) = columns.get_mut(index) {
            *slot = normalize_numbers(column);
        }
        Self {
            columns,
            row_count: self.row_count,
        }
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

fn normalize_numbers(mut column: Column) -> Column {
    for cell in &mut column.cells {
        if let Cell::Number(n) = *cell {
            *cell = Cell::number(n);
        }
    }
    column
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}
