#![forbid(unsafe_code)]

use crate::column::Column;
use crate::error::ColumnError;
use crate::types::Value;

/// An ordered list of equal-length columns.
///
/// A table with zero columns has no meaningful row count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Assemble a table, taking ownership of the columns without copying them.
    ///
    /// Panics if the columns differ in length; use [`Table::try_new`] for untrusted input.
    pub fn new(columns: Vec<Column>) -> Self {
        match Self::try_new(columns) {
            Ok(table) => table,
            Err(err) => panic!("invalid table: {err}"),
        }
    }

    pub fn try_new(columns: Vec<Column>) -> Result<Self, ColumnError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for (column, c) in columns.iter().enumerate().skip(1) {
                if c.len() != expected {
                    return Err(ColumnError::LengthMismatch {
                        column,
                        expected,
                        actual: c.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `None` for a table without columns.
    pub fn row_count(&self) -> Option<usize> {
        self.columns.first().map(Column::len)
    }

    pub fn column(&self, col: usize) -> Option<&Column> {
        self.columns.get(col)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Value {
        self.columns
            .get(col)
            .map(|c| c.get(row))
            .unwrap_or(Value::Null)
    }
}
